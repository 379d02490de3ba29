//! Connection opening and configuration.
//!
//! # Responsibility
//! - Open file-backed or in-memory SQLite connections.
//! - Set the pragmas the forum core relies on and apply the schema.
//!
//! # Invariants
//! - Every returned connection has `foreign_keys = ON` and the schema
//!   fully applied.

use super::schema::apply_schema;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (creating if needed) a database file ready for forum data access.
///
/// Emits `db_open` log events carrying duration and outcome.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    prepare("file", || Connection::open(path))
}

/// Opens a fresh in-memory database, ready for forum data access.
///
/// Emits `db_open` log events carrying duration and outcome.
pub fn open_db_in_memory() -> DbResult<Connection> {
    prepare("memory", Connection::open_in_memory)
}

fn prepare(
    mode: &str,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let mut conn = match open() {
        Ok(conn) => conn,
        Err(err) => {
            let err = DbError::from(err);
            log_open_failure(mode, started_at, "db_open_failed", &err);
            return Err(err);
        }
    };

    if let Err(err) = configure(&mut conn) {
        log_open_failure(mode, started_at, "db_bootstrap_failed", &err);
        return Err(err);
    }

    info!(
        "event=db_open module=db status=ok mode={mode} duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}

fn configure(conn: &mut Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_schema(conn)?;
    Ok(())
}

fn log_open_failure(mode: &str, started_at: Instant, error_code: &str, err: &DbError) {
    error!(
        "event=db_open module=db status=error mode={mode} duration_ms={} error_code={error_code} error={err}",
        started_at.elapsed().as_millis()
    );
}
