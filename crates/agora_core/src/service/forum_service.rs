//! Forum use-case service.
//!
//! # Responsibility
//! - Create forums and serve the forum overview and detail views.
//! - Enforce forum title uniqueness before insert.
//!
//! # Invariants
//! - Field validation runs before any repository access.
//! - Duplicate titles are rejected without writing.
//! - A forum with no topics is a valid detail view, not an error.

use crate::model::forum::NewForum;
use crate::model::ForumId;
use crate::repo::forum_repo::{ForumDetail, ForumRepository, ForumSummary};
use crate::service::{ServiceError, ServiceResult};

/// Forum service facade over repository implementations.
pub struct ForumService<R: ForumRepository> {
    repo: R,
}

impl<R: ForumRepository> ForumService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a new forum.
    ///
    /// # Contract
    /// - Validates the title before touching the store.
    /// - Rejects with [`ServiceError::ForumTitleTaken`] when the title is
    ///   already in use; the store is left unchanged.
    /// - Returns the created forum id.
    pub fn create_forum(&self, forum: &NewForum) -> ServiceResult<ForumId> {
        forum.validate()?;
        if self.repo.title_exists(&forum.title)? {
            return Err(ServiceError::ForumTitleTaken(forum.title.clone()));
        }
        Ok(self.repo.create_forum(forum)?)
    }

    /// Lists all forums sorted alphabetically by title.
    pub fn list_forums(&self) -> ServiceResult<Vec<ForumSummary>> {
        Ok(self.repo.list_forums()?)
    }

    /// Loads one forum with its topic summaries.
    ///
    /// Rejects with [`ServiceError::ForumNotFound`] when no such forum
    /// exists.
    pub fn get_forum(&self, forum_id: ForumId) -> ServiceResult<ForumDetail> {
        match self.repo.get_forum(forum_id)? {
            Some(detail) => Ok(detail),
            None => Err(ServiceError::ForumNotFound(forum_id)),
        }
    }
}
