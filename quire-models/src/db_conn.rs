use crate::Connection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
#[cfg(feature = "sqlite")]
use diesel::{sql_query, ConnectionError, RunQueryDsl};
use rocket::{
    http::Status,
    request::{self, FromRequest},
    Outcome, Request, State,
};
use std::ops::Deref;

pub type DbPool = Pool<ConnectionManager<Connection>>;

/// Builds the r2d2 pool used by the web application
pub fn init_pool(database_url: &str, max_size: Option<u32>, min_idle: Option<u32>) -> Option<DbPool> {
    let manager = ConnectionManager::<Connection>::new(database_url);
    let mut builder = DbPool::builder()
        .connection_customizer(Box::new(PragmaForeignKey))
        .min_idle(min_idle);
    if let Some(max_size) = max_size {
        builder = builder.max_size(max_size);
    };
    builder.build(manager).ok()
}

// Connection request guard type: a wrapper around an r2d2 pooled connection.
pub struct DbConn(pub PooledConnection<ConnectionManager<Connection>>);

/// Attempts to retrieve a single connection from the managed database pool. If
/// no pool is currently managed, fails with an `InternalServerError` status. If
/// no connections are available, fails with a `ServiceUnavailable` status.
impl<'a, 'r> FromRequest<'a, 'r> for DbConn {
    type Error = ();

    fn from_request(request: &'a Request<'r>) -> request::Outcome<Self, Self::Error> {
        let pool = match request.guard::<State<'_, DbPool>>() {
            Outcome::Success(pool) => pool,
            _ => return Outcome::Failure((Status::InternalServerError, ())),
        };
        match pool.get() {
            Ok(conn) => Outcome::Success(DbConn(conn)),
            Err(_) => Outcome::Failure((Status::ServiceUnavailable, ())),
        }
    }
}

// For the convenience of using an &DbConn as an &Connection.
impl Deref for DbConn {
    type Target = Connection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug)]
pub struct PragmaForeignKey;

impl CustomizeConnection<Connection, diesel::r2d2::Error> for PragmaForeignKey {
    #[cfg(feature = "sqlite")]
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), diesel::r2d2::Error> {
        sql_query("PRAGMA foreign_keys = on;")
            .execute(conn)
            .map(|_| ())
            .map_err(|_| {
                diesel::r2d2::Error::ConnectionError(ConnectionError::BadConnection(String::from(
                    "PRAGMA foreign_keys = on failed",
                )))
            })
    }

    #[cfg(feature = "postgres")]
    fn on_acquire(&self, _conn: &mut Connection) -> Result<(), diesel::r2d2::Error> {
        Ok(())
    }
}
