use quire_api::key_value::KeyValuePair;
use rocket_contrib::json::Json;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::iter;

const KEY: &str = "key";
const VALUE: &str = "Json Key-Value Demo";

/// `{"key": "Json Key-Value Demo"}`, from a map
#[get("/map")]
pub fn map() -> Json<HashMap<&'static str, &'static str>> {
    let mut values = HashMap::new();
    values.insert(KEY, VALUE);
    Json(values)
}

/// The same object, from a single entry
#[get("/simpleentry")]
pub fn simple_entry() -> Json<Value> {
    let mut entry = Map::new();
    entry.insert(KEY.to_owned(), Value::from(VALUE));
    Json(Value::Object(entry))
}

/// The same object, from a one-element collection
#[get("/singleton")]
pub fn singleton() -> Json<BTreeMap<&'static str, &'static str>> {
    Json(iter::once((KEY, VALUE)).collect())
}

/// `{"key": "key", "value": "Json Key-Value Demo"}`
#[get("/pair")]
pub fn pair() -> Json<KeyValuePair<&'static str, &'static str>> {
    Json(KeyValuePair::new(KEY, VALUE))
}
