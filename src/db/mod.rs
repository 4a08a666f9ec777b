//! SQLite storage bootstrap and the shared connection handle.
//!
//! # Responsibility
//! - Open and configure the SQLite connection used by every store.
//! - Run units of work either directly or inside a transaction.
//! - Classify constraint violations so services can translate them.
//!
//! # Invariants
//! - The connection has `foreign_keys=ON` and all migrations applied.
//! - A failed transaction closure rolls back every statement it issued.

use log::{error, info};
use rusqlite::{ffi, Connection, ErrorCode, Transaction};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

pub mod migrations;

use migrations::apply_migrations;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    UniqueViolation,
    ForeignKeyViolation,
    InvalidData(String),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    Poisoned,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UniqueViolation => write!(f, "unique constraint violated"),
            Self::ForeignKeyViolation => write!(f, "foreign key constraint violated"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Poisoned => write!(f, "database connection lock poisoned"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        let extended_code = match &value {
            rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation => {
                Some(err.extended_code)
            }
            _ => None,
        };

        match extended_code {
            Some(ffi::SQLITE_CONSTRAINT_UNIQUE) | Some(ffi::SQLITE_CONSTRAINT_PRIMARYKEY) => {
                Self::UniqueViolation
            }
            Some(ffi::SQLITE_CONSTRAINT_FOREIGNKEY) => Self::ForeignKeyViolation,
            _ => Self::Sqlite(value),
        }
    }
}

/// Shared handle over the single SQLite connection.
///
/// Cloning is cheap; all clones serialize on the same connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens (or creates) a database file and applies pending migrations.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|err| {
                    StoreError::InvalidData(format!(
                        "cannot create database directory `{}`: {err}",
                        parent.display()
                    ))
                })?;
            }
        }

        let started_at = Instant::now();
        info!("event=db_open status=start mode=file path={}", path.display());
        let conn = Connection::open(path)?;
        Self::bootstrap(conn, "file", started_at)
    }

    /// Opens a private in-memory database with migrations applied.
    pub fn open_in_memory() -> StoreResult<Self> {
        let started_at = Instant::now();
        info!("event=db_open status=start mode=memory");
        let conn = Connection::open_in_memory()?;
        Self::bootstrap(conn, "memory", started_at)
    }

    fn bootstrap(mut conn: Connection, mode: &str, started_at: Instant) -> StoreResult<Self> {
        let configured = conn
            .execute_batch("PRAGMA foreign_keys = ON;")
            .and_then(|_| conn.busy_timeout(Duration::from_secs(5)))
            .map_err(StoreError::from)
            .and_then(|_| apply_migrations(&mut conn));

        match configured {
            Ok(()) => {
                info!(
                    "event=db_open status=ok mode={} duration_ms={}",
                    mode,
                    started_at.elapsed().as_millis()
                );
                Ok(Self {
                    conn: Arc::new(Mutex::new(conn)),
                })
            }
            Err(err) => {
                error!(
                    "event=db_open status=error mode={} duration_ms={} error={}",
                    mode,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Runs `f` against the connection outside of an explicit transaction.
    pub fn with_conn<T, E>(&self, f: impl FnOnce(&Connection) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let guard = self.conn.lock().map_err(|_| E::from(StoreError::Poisoned))?;
        f(&guard)
    }

    /// Runs `f` inside a transaction; commits on `Ok`, rolls back on `Err`.
    pub fn transaction<T, E>(&self, f: impl FnOnce(&Transaction<'_>) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut guard = self.conn.lock().map_err(|_| E::from(StoreError::Poisoned))?;
        let tx = guard
            .transaction()
            .map_err(|err| E::from(StoreError::from(err)))?;
        let value = f(&tx)?;
        tx.commit().map_err(|err| E::from(StoreError::from(err)))?;
        Ok(value)
    }
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub(crate) fn int_to_bool(value: i64, column: &str) -> StoreResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(StoreError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}

pub(crate) fn parse_uuid(value: &str, column: &str) -> StoreResult<uuid::Uuid> {
    uuid::Uuid::parse_str(value)
        .map_err(|_| StoreError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

#[cfg(test)]
mod tests {
    use super::{Database, StoreError};

    #[test]
    fn duplicate_primary_key_is_classified_as_unique_violation() {
        let db = Database::open_in_memory().unwrap();
        let result: Result<(), StoreError> = db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO team (id, name, uri, created_at) VALUES ('a', 'A', 'a', '2024-01-01')",
                [],
            )?;
            conn.execute(
                "INSERT INTO team (id, name, uri, created_at) VALUES ('b', 'A', 'a', '2024-01-01')",
                [],
            )?;
            Ok(())
        });
        assert!(matches!(result, Err(StoreError::UniqueViolation)));
    }

    #[test]
    fn missing_parent_is_classified_as_foreign_key_violation() {
        let db = Database::open_in_memory().unwrap();
        let result: Result<usize, StoreError> = db.with_conn(|conn| {
            Ok(conn.execute(
                "INSERT INTO invite (id, team_id, created_at) VALUES ('i', 'missing', '2024-01-01')",
                [],
            )?)
        });
        assert!(matches!(result, Err(StoreError::ForeignKeyViolation)));
    }

    #[test]
    fn failed_transaction_rolls_back() {
        let db = Database::open_in_memory().unwrap();
        let result: Result<(), StoreError> = db.transaction(|tx| {
            tx.execute(
                "INSERT INTO team (id, name, uri, created_at) VALUES ('a', 'A', 'a', '2024-01-01')",
                [],
            )?;
            Err(StoreError::InvalidData("abort".to_string()))
        });
        assert!(result.is_err());

        let count: i64 = db
            .with_conn(|conn| {
                conn.query_row("SELECT COUNT(*) FROM team", [], |row| row.get(0))
                    .map_err(StoreError::from)
            })
            .unwrap();
        assert_eq!(count, 0);
    }
}
