use clap::App;
use diesel::Connection;
use quire_models::{Connection as Conn, CONFIG};
use std::io::{self, prelude::*};
use tracing_subscriber::EnvFilter;

mod migration;
mod posts;
mod users;

fn main() {
    let mut app = App::new("Quire CLI")
        .bin_name("qrm")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Collection of tools to manage your Quire blog.")
        .subcommand(migration::command())
        .subcommand(posts::command())
        .subcommand(users::command());
    let matches = app.clone().get_matches();

    match dotenv::dotenv() {
        Ok(path) => println!("Configuration read from {}", path.display()),
        Err(ref e) if e.not_found() => eprintln!("no .env was found"),
        e => e.map(|_| ()).unwrap(),
    }
    tracing_subscriber::fmt::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let conn = Conn::establish(CONFIG.database_url.as_str());

    match matches.subcommand() {
        ("migration", Some(args)) => {
            migration::run(args, &conn.expect("Couldn't connect to the database."))
        }
        ("posts", Some(args)) => posts::run(args, &conn.expect("Couldn't connect to the database.")),
        ("users", Some(args)) => users::run(args, &conn.expect("Couldn't connect to the database.")),
        _ => app.print_help().expect("Couldn't print help"),
    };
}

pub fn ask_for(something: &str) -> String {
    print!("{}: ", something);
    io::stdout().flush().expect("Couldn't flush STDOUT");
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .expect("Unable to read line");
    input.retain(|c| c != '\n');
    input
}
