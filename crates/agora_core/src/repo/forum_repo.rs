//! Forum repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide forum insert/listing APIs over the `forums` table.
//! - Assemble the forum detail view (forum plus its topics) from one
//!   outer-joined query.
//!
//! # Invariants
//! - Forum titles stay unique; the duplicate check runs before every insert
//!   and the schema enforces it as a backstop.
//! - Forum listing is alphabetical by title; topics within a forum keep
//!   creation order.
//! - A forum without topics yields an empty topic list, never an error.

use crate::model::forum::NewForum;
use crate::model::{ForumId, TopicId};
use crate::repo::{ensure_connection_ready, with_immediate_tx, RepoError, RepoResult};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

const REQUIRED_TABLES: &[(&str, &[&str])] = &[
    ("forums", &["id", "title"]),
    ("topics", &["id", "title", "forum_id"]),
];

/// Read model for one forum in the overall listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumSummary {
    /// Stable forum id.
    pub id: ForumId,
    /// Unique forum title.
    pub title: String,
}

/// Read model for one topic inside a forum detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSummary {
    /// Stable topic id.
    pub topic_id: TopicId,
    /// Forum the topic belongs to.
    pub forum_id: ForumId,
    /// Topic title.
    pub title: String,
}

/// Read model for one forum with all of its topics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumDetail {
    /// Stable forum id.
    pub id: ForumId,
    /// Unique forum title.
    pub title: String,
    /// Topics in creation order. Empty when the forum has none.
    pub topics: Vec<TopicSummary>,
}

/// Repository interface for forum operations.
pub trait ForumRepository {
    /// Inserts one forum and returns its row id.
    fn create_forum(&self, forum: &NewForum) -> RepoResult<ForumId>;
    /// Returns whether a forum title is already in use.
    fn title_exists(&self, title: &str) -> RepoResult<bool>;
    /// Lists all forums alphabetically by title.
    fn list_forums(&self) -> RepoResult<Vec<ForumSummary>>;
    /// Loads one forum with its topics.
    fn get_forum(&self, forum_id: ForumId) -> RepoResult<Option<ForumDetail>>;
}

/// SQLite-backed forum repository.
pub struct SqliteForumRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteForumRepository<'conn> {
    /// Constructs a repository from a bootstrapped connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, REQUIRED_TABLES)?;
        Ok(Self { conn })
    }
}

impl ForumRepository for SqliteForumRepository<'_> {
    fn create_forum(&self, forum: &NewForum) -> RepoResult<ForumId> {
        with_immediate_tx(self.conn, |tx| {
            tx.execute(
                "INSERT INTO forums (title) VALUES (?1);",
                [forum.title.as_str()],
            )?;
            Ok(tx.last_insert_rowid())
        })
    }

    fn title_exists(&self, title: &str) -> RepoResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(1) FROM forums WHERE title = ?1;",
            [title],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn list_forums(&self) -> RepoResult<Vec<ForumSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title
             FROM forums
             ORDER BY title COLLATE NOCASE ASC, id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut forums = Vec::new();
        while let Some(row) = rows.next()? {
            forums.push(ForumSummary {
                id: row.get("id")?,
                title: row.get("title")?,
            });
        }
        Ok(forums)
    }

    fn get_forum(&self, forum_id: ForumId) -> RepoResult<Option<ForumDetail>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                forums.title AS forum_title,
                topics.id AS topic_id,
                topics.title AS topic_title
             FROM forums
             LEFT JOIN topics ON topics.forum_id = forums.id
             WHERE forums.id = ?1
             ORDER BY topics.id ASC;",
        )?;
        let mut rows = stmt.query([forum_id])?;

        let mut detail: Option<ForumDetail> = None;
        while let Some(row) = rows.next()? {
            let forum_title: String = row.get("forum_title")?;
            let forum = detail.get_or_insert_with(|| ForumDetail {
                id: forum_id,
                title: forum_title,
                topics: Vec::new(),
            });

            // LEFT JOIN: a forum without topics produces one row with NULL
            // topic columns.
            let topic_id: Option<TopicId> = row.get("topic_id")?;
            if let Some(topic_id) = topic_id {
                let title: Option<String> = row.get("topic_title")?;
                let title = title.ok_or_else(|| {
                    RepoError::InvalidData(format!("topic {topic_id} row is missing its title"))
                })?;
                forum.topics.push(TopicSummary {
                    topic_id,
                    forum_id,
                    title,
                });
            }
        }

        Ok(detail)
    }
}
