//! SQLite storage bootstrap for the forum core.
//!
//! # Responsibility
//! - Open and configure the connections every repository borrows.
//! - Apply the forum schema before handing a connection out.
//!
//! # Invariants
//! - `PRAGMA user_version` mirrors the applied schema version.
//! - No forum data is read or written through a connection whose schema
//!   apply has not succeeded.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure opening or bootstrapping a database connection.
#[derive(Debug)]
pub enum DbError {
    /// Error surfaced by the SQLite driver.
    Sqlite(rusqlite::Error),
    /// The database was written by a newer build of this crate.
    SchemaVersionTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::SchemaVersionTooNew { found, supported } => write!(
                f,
                "database schema version {found} is newer than this build supports ({supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaVersionTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
