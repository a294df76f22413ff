#[macro_use]
extern crate serde_derive;

pub mod key_value;
pub mod tags;
