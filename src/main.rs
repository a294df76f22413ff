#![feature(proc_macro_hygiene, decl_macro)]

#[macro_use]
extern crate rocket;
#[macro_use]
extern crate serde_json;

use dotenv::dotenv;
use quire_models::{
    db_conn::{init_pool, DbPool},
    migrations::run_pending_migrations,
    CONFIG,
};
use rocket::Rocket;
use std::process::exit;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod routes;
mod template_utils;

include!(concat!(env!("OUT_DIR"), "/templates.rs"));

/// Mounts the routes of the application on `rocket`, and gives it the
/// database pool to draw connections from.
pub fn init_rocket(rocket: Rocket, dbpool: DbPool) -> Rocket {
    rocket
        .mount(
            "/json/posts",
            routes![
                routes::posts::titles,
                routes::posts::titles_more,
                routes::posts::tag_titles,
                routes::posts::tag_titles_more,
                routes::posts::posts,
                routes::posts::posts_more,
                routes::posts::tagged,
                routes::posts::tagged_more,
                routes::posts::liked,
                routes::posts::liked_more,
                routes::likes::toggle,
                routes::tags::all,
                routes::tags::values,
                routes::tags::cloud,
                routes::key_value::map,
                routes::key_value::simple_entry,
                routes::key_value::singleton,
                routes::key_value::pair,
            ],
        )
        .mount(
            "/",
            routes![routes::session::create, routes::session::delete],
        )
        .register(catchers![
            routes::errors::unauthorized,
            routes::errors::not_found,
            routes::errors::server_error,
        ])
        .manage(dbpool)
}

fn main() {
    match dotenv() {
        Ok(path) => eprintln!("Configuration read from {}", path.display()),
        Err(ref e) if e.not_found() => eprintln!("no .env was found"),
        e => e.map(|_| ()).unwrap(),
    }

    tracing_subscriber::fmt::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let dbpool = init_pool(
        &CONFIG.database_url,
        CONFIG.db_max_size,
        CONFIG.db_min_idle,
    )
    .expect("main: database pool initialization error");
    match dbpool.get() {
        Ok(conn) => {
            if let Err(e) = run_pending_migrations(&conn) {
                error!("Couldn't run the database migrations: {}", e);
                exit(1);
            }
        }
        Err(e) => {
            error!("Couldn't connect to {}: {}", CONFIG.database_url, e);
            exit(1);
        }
    }

    let config = match CONFIG.rocket.clone() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid server configuration: {:?}", e);
            eprintln!("Please make sure ROCKET_SECRET_KEY is set to a valid value");
            exit(1);
        }
    };
    info!("Serving on {}", CONFIG.base_url);
    let err = init_rocket(rocket::custom(config), dbpool).launch();
    error!("Launch failed: {}", err);
}
