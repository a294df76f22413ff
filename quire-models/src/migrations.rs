use crate::{Connection, Result};
use tracing::info;

#[cfg(feature = "sqlite")]
embed_migrations!("migrations/sqlite");

#[cfg(feature = "postgres")]
embed_migrations!("migrations/postgres");

/// Runs every embedded migration that was not applied to this database yet
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    info!("Running pending migrations");
    embedded_migrations::run(conn)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::db;

    #[test]
    fn migrations_are_idempotent() {
        let conn = db();
        run_pending_migrations(&conn).expect("Second run should be a no-op");
    }
}
