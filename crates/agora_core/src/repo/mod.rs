//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repositories only accept connections with the schema fully applied;
//!   `try_new` constructors verify version and required tables up front.
//! - Every mutation runs inside its own immediate transaction; a failed
//!   statement is rolled back before the error is surfaced.
//! - Inputs are validated by the service layer before they reach SQL.

use crate::db::schema::SCHEMA_VERSION;
use crate::db::DbError;
use log::error;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod forum_repo;
pub mod person_repo;
pub mod topic_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Data-store malfunction reported by repository operations.
///
/// Every variant is unrecoverable from the caller's point of view; recoverable
/// conditions (unknown usernames, duplicate titles) are modeled as `Option`
/// returns or service-level rejections instead.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// A mutation failed and rolling back its transaction failed too.
    RollbackFailed {
        cause: String,
        rollback_error: String,
    },
    /// Connection schema is not at the expected applied version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::RollbackFailed {
                cause,
                rollback_error,
            } => write!(
                f,
                "rollback failed: {rollback_error} (while handling write error: {cause})"
            ),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Runs one mutation inside an immediate transaction.
///
/// Commits on success. On a statement error the transaction is rolled back
/// explicitly before the error is surfaced; if the rollback itself fails, the
/// returned error names both failures.
pub(crate) fn with_immediate_tx<T>(
    conn: &Connection,
    op: impl FnOnce(&Transaction<'_>) -> Result<T, rusqlite::Error>,
) -> RepoResult<T> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    match op(&tx) {
        Ok(value) => {
            tx.commit()?;
            Ok(value)
        }
        Err(cause) => match tx.rollback() {
            Ok(()) => {
                error!("event=mutation_rollback module=repo status=ok error={cause}");
                Err(RepoError::Db(DbError::Sqlite(cause)))
            }
            Err(rollback_error) => {
                error!(
                    "event=mutation_rollback module=repo status=error error={cause} rollback_error={rollback_error}"
                );
                Err(RepoError::RollbackFailed {
                    cause: cause.to_string(),
                    rollback_error: rollback_error.to_string(),
                })
            }
        },
    }
}

/// Verifies that a connection carries the applied schema and every table and
/// column the calling repository relies on.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    required: &[(&'static str, &[&'static str])],
) -> RepoResult<()> {
    let actual_version = schema_user_version(conn)?;
    if actual_version != SCHEMA_VERSION {
        return Err(RepoError::UninitializedConnection {
            expected_version: SCHEMA_VERSION,
            actual_version,
        });
    }

    for &(table, columns) in required {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

fn schema_user_version(conn: &Connection) -> RepoResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
