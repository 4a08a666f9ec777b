// src/db/migrations/mod.rs
//! Retro schema setup. The schema revision lives in `PRAGMA user_version`.

use crate::db::{StoreError, StoreResult};
use log::info;
use rusqlite::Connection;

/// Schema revision written by `0001_init.sql`.
pub const SCHEMA_VERSION: u32 = 1;

const INIT_SQL: &str = include_str!("0001_init.sql");

/// Brings a fresh database up to `SCHEMA_VERSION`. A database already at
/// that revision is left alone; a newer one is refused.
pub fn apply_migrations(conn: &mut Connection) -> StoreResult<()> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if found > SCHEMA_VERSION {
        return Err(StoreError::UnsupportedSchemaVersion {
            db_version: found,
            latest_supported: SCHEMA_VERSION,
        });
    }
    if found == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(INIT_SQL)?;
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()?;
    info!("✅ Retro schema created at version {}", SCHEMA_VERSION);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{apply_migrations, SCHEMA_VERSION};
    use crate::db::StoreError;
    use rusqlite::Connection;

    fn user_version(conn: &Connection) -> u32 {
        conn.query_row("PRAGMA user_version;", [], |row| row.get(0)).unwrap()
    }

    #[test]
    fn schema_setup_runs_once() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        apply_migrations(&mut conn).unwrap();
        assert_eq!(user_version(&conn), SCHEMA_VERSION);

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'team'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 1);
    }

    #[test]
    fn newer_schema_is_refused() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", SCHEMA_VERSION + 1).unwrap();
        assert!(matches!(
            apply_migrations(&mut conn),
            Err(StoreError::UnsupportedSchemaVersion { db_version, .. }) if db_version == SCHEMA_VERSION + 1
        ));
    }
}
