//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, existence checks, and repository calls into
//!   use-case level APIs.
//! - Classify every outcome as success, rejection, or fatal storage failure.
//!
//! # Invariants
//! - Input validation always runs before any repository access.
//! - Rejections (`is_fatal() == false`) leave the store untouched.
//! - Repository errors surface as [`ServiceError::Fatal`] unchanged.

pub mod forum_service;
pub mod person_service;
pub mod topic_service;

use crate::model::{ForumId, TopicId};
use crate::model::validate::ValidationError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result alias for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error distinguishing recoverable rejections from fatal failures.
///
/// Every variant except [`ServiceError::Fatal`] is a rejection: the request
/// was refused before or without touching the store, and the caller may fix
/// the input and retry. `Fatal` wraps a storage failure after which the
/// connection should not be trusted.
#[derive(Debug)]
pub enum ServiceError {
    /// Input failed a field check before any repository access.
    Validation(ValidationError),
    /// Requested username is already registered.
    UsernameTaken(String),
    /// Requested forum title is already in use.
    ForumTitleTaken(String),
    /// Referenced person does not exist.
    PersonNotFound(String),
    /// Referenced forum does not exist.
    ForumNotFound(ForumId),
    /// Referenced topic does not exist.
    TopicNotFound(TopicId),
    /// Persistence-layer failure; the store may be in an unknown state.
    Fatal(RepoError),
}

impl ServiceError {
    /// Returns whether the error is a fatal storage failure rather than a
    /// recoverable rejection.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::UsernameTaken(username) => {
                write!(f, "person with username `{username}` already exists")
            }
            Self::ForumTitleTaken(title) => {
                write!(f, "forum titled `{title}` already exists")
            }
            Self::PersonNotFound(username) => write!(f, "person not found: `{username}`"),
            Self::ForumNotFound(forum_id) => write!(f, "forum not found: {forum_id}"),
            Self::TopicNotFound(topic_id) => write!(f, "topic not found: {topic_id}"),
            Self::Fatal(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Fatal(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Fatal(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbError;

    #[test]
    fn rejections_are_not_fatal() {
        let errors = [
            ServiceError::Validation(ValidationError::Empty { field: "name" }),
            ServiceError::UsernameTaken("ada".to_string()),
            ServiceError::ForumTitleTaken("General".to_string()),
            ServiceError::PersonNotFound("ghost".to_string()),
            ServiceError::ForumNotFound(7),
            ServiceError::TopicNotFound(9),
        ];
        for err in errors {
            assert!(!err.is_fatal(), "expected rejection: {err}");
        }
    }

    #[test]
    fn repo_errors_convert_to_fatal() {
        let err: ServiceError =
            RepoError::Db(DbError::Sqlite(rusqlite::Error::InvalidQuery)).into();
        assert!(err.is_fatal());
    }

    #[test]
    fn display_names_the_conflicting_value() {
        let err = ServiceError::UsernameTaken("ada".to_string());
        assert_eq!(err.to_string(), "person with username `ada` already exists");
        let err = ServiceError::TopicNotFound(42);
        assert_eq!(err.to_string(), "topic not found: 42");
    }
}
