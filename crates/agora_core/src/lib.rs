//! Data-access core for a small discussion forum.
//!
//! The crate is layered bottom-up: `db` opens and bootstraps SQLite
//! connections, `model` holds input records and field validation, `repo`
//! speaks SQL behind per-entity traits, and `service` wraps the repositories
//! with the rules callers rely on (duplicate checks, existence checks,
//! rejection errors). `logging` wires rolling file logs for all of it.
//!
//! Callers outside the crate are expected to use the re-exports below
//! rather than reaching into the layer modules.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::forum::NewForum;
pub use model::person::NewPerson;
pub use model::validate::ValidationError;
pub use model::{ForumId, PersonId, PostId, TopicId};
pub use repo::forum_repo::{
    ForumDetail, ForumRepository, ForumSummary, SqliteForumRepository, TopicSummary,
};
pub use repo::person_repo::{PersonRepository, PersonView, SqlitePersonRepository};
pub use repo::topic_repo::{PostView, SqliteTopicRepository, TopicDetail, TopicRepository};
pub use repo::{RepoError, RepoResult};
pub use service::forum_service::ForumService;
pub use service::person_service::PersonService;
pub use service::topic_service::{CreatePostRequest, CreateTopicRequest, TopicService};
pub use service::{ServiceError, ServiceResult};

/// Liveness probe for embedders and smoke tests.
pub fn ping() -> &'static str {
    "pong"
}

/// Version of this crate as compiled.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
