//! Person repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide person insert/lookup APIs over the `persons` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `username` stays unique; the duplicate check runs before every insert
//!   and the schema enforces it as a backstop.
//! - Inserts run inside their own immediate transaction.

use crate::model::person::NewPerson;
use crate::model::PersonId;
use crate::repo::{ensure_connection_ready, with_immediate_tx, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const REQUIRED_TABLES: &[(&str, &[&str])] =
    &[("persons", &["id", "name", "username", "student_id"])];

/// Read model for one person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonView {
    /// Display name shown as post author.
    pub name: String,
    /// Unique login handle.
    pub username: String,
    /// Optional external student identifier.
    pub student_id: Option<String>,
}

/// Repository interface for person operations.
pub trait PersonRepository {
    /// Inserts one person and returns its row id.
    fn create_person(&self, person: &NewPerson) -> RepoResult<PersonId>;
    /// Loads one person by username.
    fn get_person(&self, username: &str) -> RepoResult<Option<PersonView>>;
    /// Returns whether a username is already taken.
    fn username_exists(&self, username: &str) -> RepoResult<bool>;
    /// Returns all known persons as a username -> name mapping.
    fn list_users(&self) -> RepoResult<BTreeMap<String, String>>;
}

/// SQLite-backed person repository.
pub struct SqlitePersonRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePersonRepository<'conn> {
    /// Constructs a repository from a bootstrapped connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, REQUIRED_TABLES)?;
        Ok(Self { conn })
    }
}

impl PersonRepository for SqlitePersonRepository<'_> {
    fn create_person(&self, person: &NewPerson) -> RepoResult<PersonId> {
        with_immediate_tx(self.conn, |tx| {
            tx.execute(
                "INSERT INTO persons (name, username, student_id)
                 VALUES (?1, ?2, ?3);",
                params![
                    person.name.as_str(),
                    person.username.as_str(),
                    person.student_id.as_deref(),
                ],
            )?;
            Ok(tx.last_insert_rowid())
        })
    }

    fn get_person(&self, username: &str) -> RepoResult<Option<PersonView>> {
        let view = self
            .conn
            .query_row(
                "SELECT name, username, student_id
                 FROM persons
                 WHERE username = ?1;",
                [username],
                parse_person_row,
            )
            .optional()?;
        Ok(view)
    }

    fn username_exists(&self, username: &str) -> RepoResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(1) FROM persons WHERE username = ?1;",
            [username],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn list_users(&self) -> RepoResult<BTreeMap<String, String>> {
        let mut stmt = self.conn.prepare("SELECT username, name FROM persons;")?;
        let mut rows = stmt.query([])?;
        let mut users = BTreeMap::new();
        while let Some(row) = rows.next()? {
            let username: String = row.get("username")?;
            let name: String = row.get("name")?;
            users.insert(username, name);
        }
        Ok(users)
    }
}

fn parse_person_row(row: &Row<'_>) -> Result<PersonView, rusqlite::Error> {
    Ok(PersonView {
        name: row.get("name")?,
        username: row.get("username")?,
        student_id: row.get("student_id")?,
    })
}
