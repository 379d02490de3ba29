//! Forum schema bootstrap.
//!
//! # Responsibility
//! - Create the person/forum/topic/post tables on fresh databases.
//! - Mirror the applied schema version to `PRAGMA user_version`.
//!
//! # Invariants
//! - The schema apply is idempotent: the DDL batch uses `IF NOT EXISTS` and
//!   runs inside one transaction.
//! - A database stamped with a newer version than this build understands is
//!   rejected instead of reinterpreted.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// Schema version written to `PRAGMA user_version` after a successful apply.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Applies the forum schema on the provided connection.
///
/// Fresh databases get the full DDL batch and a version stamp; databases
/// already at [`SCHEMA_VERSION`] are left untouched.
pub fn apply_schema(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;

    if current_version > SCHEMA_VERSION {
        return Err(DbError::SchemaVersionTooNew {
            found: current_version,
            supported: SCHEMA_VERSION,
        });
    }

    if current_version == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;

    info!("event=schema_apply module=db status=ok version={SCHEMA_VERSION}");
    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
