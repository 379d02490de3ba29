//! Topic/post repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide topic and post persistence over the `topics` and `posts` tables.
//! - Create a topic together with its seed post in one transaction.
//! - Assemble the topic detail view (title plus numbered posts).
//!
//! # Invariants
//! - A topic and its first post are written atomically: both rows or neither.
//! - Posts within a topic keep insertion order and are numbered from 1.
//! - `posted_at` is assigned by the database at insert time, in epoch
//!   milliseconds.

use crate::model::{ForumId, PersonId, PostId, TopicId};
use crate::repo::{ensure_connection_ready, with_immediate_tx, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

const REQUIRED_TABLES: &[(&str, &[&str])] = &[
    ("persons", &["id", "name", "username"]),
    ("forums", &["id"]),
    ("topics", &["id", "title", "forum_id", "person_id"]),
    ("posts", &["id", "posted_at", "post_text", "person_id", "topic_id"]),
];

/// Read model for one post inside a topic detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostView {
    /// 1-based position of the post within its topic.
    pub number: u32,
    /// Author display name.
    pub author: String,
    /// Post body.
    pub text: String,
    /// Insert timestamp in epoch milliseconds.
    pub posted_at: i64,
}

/// Read model for one topic with all of its posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDetail {
    /// Stable topic id.
    pub topic_id: TopicId,
    /// Topic title.
    pub title: String,
    /// Posts in insertion order, numbered from 1.
    pub posts: Vec<PostView>,
}

/// Repository interface for topic and post operations.
///
/// Besides its own tables this repository resolves the author and parent
/// references its use-cases need (person by username, forum/topic existence).
pub trait TopicRepository {
    /// Inserts one topic and its seed post atomically; returns the topic id.
    fn create_topic_with_first_post(
        &self,
        forum_id: ForumId,
        author: PersonId,
        title: &str,
        first_post_text: &str,
    ) -> RepoResult<TopicId>;
    /// Inserts one post into an existing topic; returns the post id.
    fn create_post(&self, topic_id: TopicId, author: PersonId, text: &str) -> RepoResult<PostId>;
    /// Loads one topic with its posts.
    fn get_topic(&self, topic_id: TopicId) -> RepoResult<Option<TopicDetail>>;
    /// Counts all posts in one topic.
    fn count_posts(&self, topic_id: TopicId) -> RepoResult<u32>;
    /// Returns whether a topic exists.
    fn topic_exists(&self, topic_id: TopicId) -> RepoResult<bool>;
    /// Returns whether a forum exists.
    fn forum_exists(&self, forum_id: ForumId) -> RepoResult<bool>;
    /// Resolves a username to its person row id.
    fn person_id_by_username(&self, username: &str) -> RepoResult<Option<PersonId>>;
}

/// SQLite-backed topic/post repository.
pub struct SqliteTopicRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTopicRepository<'conn> {
    /// Constructs a repository from a bootstrapped connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, REQUIRED_TABLES)?;
        Ok(Self { conn })
    }
}

impl TopicRepository for SqliteTopicRepository<'_> {
    fn create_topic_with_first_post(
        &self,
        forum_id: ForumId,
        author: PersonId,
        title: &str,
        first_post_text: &str,
    ) -> RepoResult<TopicId> {
        with_immediate_tx(self.conn, |tx| {
            tx.execute(
                "INSERT INTO topics (title, forum_id, person_id)
                 VALUES (?1, ?2, ?3);",
                params![title, forum_id, author],
            )?;
            let topic_id = tx.last_insert_rowid();
            tx.execute(
                "INSERT INTO posts (posted_at, post_text, person_id, topic_id)
                 VALUES ((strftime('%s', 'now') * 1000), ?1, ?2, ?3);",
                params![first_post_text, author, topic_id],
            )?;
            Ok(topic_id)
        })
    }

    fn create_post(&self, topic_id: TopicId, author: PersonId, text: &str) -> RepoResult<PostId> {
        with_immediate_tx(self.conn, |tx| {
            tx.execute(
                "INSERT INTO posts (posted_at, post_text, person_id, topic_id)
                 VALUES ((strftime('%s', 'now') * 1000), ?1, ?2, ?3);",
                params![text, author, topic_id],
            )?;
            Ok(tx.last_insert_rowid())
        })
    }

    fn get_topic(&self, topic_id: TopicId) -> RepoResult<Option<TopicDetail>> {
        let title: Option<String> = self
            .conn
            .query_row(
                "SELECT title FROM topics WHERE id = ?1;",
                [topic_id],
                |row| row.get(0),
            )
            .optional()?;
        let Some(title) = title else {
            return Ok(None);
        };

        let mut stmt = self.conn.prepare(
            "SELECT
                persons.name AS author,
                posts.post_text AS post_text,
                posts.posted_at AS posted_at
             FROM posts
             INNER JOIN persons ON persons.id = posts.person_id
             WHERE posts.topic_id = ?1
             ORDER BY posts.id ASC;",
        )?;
        let mut rows = stmt.query([topic_id])?;

        let mut posts = Vec::new();
        let mut number: u32 = 1;
        while let Some(row) = rows.next()? {
            posts.push(PostView {
                number,
                author: row.get("author")?,
                text: row.get("post_text")?,
                posted_at: row.get("posted_at")?,
            });
            number += 1;
        }

        Ok(Some(TopicDetail {
            topic_id,
            title,
            posts,
        }))
    }

    fn count_posts(&self, topic_id: TopicId) -> RepoResult<u32> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(1) FROM posts WHERE topic_id = ?1;",
            [topic_id],
            |row| row.get(0),
        )?;
        u32::try_from(count).map_err(|_| {
            RepoError::InvalidData(format!("post count {count} for topic {topic_id} out of range"))
        })
    }

    fn topic_exists(&self, topic_id: TopicId) -> RepoResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(1) FROM topics WHERE id = ?1;",
            [topic_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn forum_exists(&self, forum_id: ForumId) -> RepoResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(1) FROM forums WHERE id = ?1;",
            [forum_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn person_id_by_username(&self, username: &str) -> RepoResult<Option<PersonId>> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM persons WHERE username = ?1;",
                [username],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }
}
