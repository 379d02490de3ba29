//! Topic and post use-case service.
//!
//! # Responsibility
//! - Open topics (topic plus seed post, atomically) and append posts.
//! - Serve the topic detail view and per-topic post counts.
//!
//! # Invariants
//! - Field validation runs before any repository access.
//! - Author and parent references are checked before writing; a missing
//!   person, forum, or topic is a rejection, not a storage failure.
//! - A topic is never created without its first post.

use crate::model::validate::{
    check_max_len, check_required, ValidationError, MAX_POST_TEXT_LEN, MAX_TITLE_LEN,
    MAX_USERNAME_LEN,
};
use crate::model::{ForumId, PersonId, PostId, TopicId};
use crate::repo::topic_repo::{TopicDetail, TopicRepository};
use crate::service::{ServiceError, ServiceResult};
use serde::{Deserialize, Serialize};

/// Input for opening a new topic with its first post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTopicRequest {
    /// Parent forum id.
    pub forum_id: ForumId,
    /// Username of the topic author.
    pub author_username: String,
    /// Topic title.
    pub title: String,
    /// Body of the seed post.
    pub first_post_text: String,
}

impl CreateTopicRequest {
    /// Checks all field constraints for opening a topic.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required("username", &self.author_username)?;
        check_max_len("username", &self.author_username, MAX_USERNAME_LEN)?;
        check_required("text", &self.first_post_text)?;
        check_max_len("text", &self.first_post_text, MAX_POST_TEXT_LEN)?;
        check_required("title", &self.title)?;
        check_max_len("title", &self.title, MAX_TITLE_LEN)?;
        Ok(())
    }
}

/// Input for appending a post to an existing topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePostRequest {
    /// Target topic id.
    pub topic_id: TopicId,
    /// Username of the post author.
    pub author_username: String,
    /// Post body.
    pub text: String,
}

impl CreatePostRequest {
    /// Checks all field constraints for appending a post.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required("username", &self.author_username)?;
        check_max_len("username", &self.author_username, MAX_USERNAME_LEN)?;
        check_required("text", &self.text)?;
        check_max_len("text", &self.text, MAX_POST_TEXT_LEN)?;
        Ok(())
    }
}

/// Topic service facade over repository implementations.
pub struct TopicService<R: TopicRepository> {
    repo: R,
}

impl<R: TopicRepository> TopicService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Opens a new topic together with its first post.
    ///
    /// # Contract
    /// - Validates all fields before touching the store.
    /// - Rejects with [`ServiceError::PersonNotFound`] /
    ///   [`ServiceError::ForumNotFound`] when the author or forum is
    ///   missing; the store is left unchanged.
    /// - Topic row and seed post are written in one transaction.
    /// - Returns the created topic id.
    pub fn create_topic(&self, request: &CreateTopicRequest) -> ServiceResult<TopicId> {
        request.validate()?;
        let author = self.resolve_author(&request.author_username)?;
        if !self.repo.forum_exists(request.forum_id)? {
            return Err(ServiceError::ForumNotFound(request.forum_id));
        }
        Ok(self.repo.create_topic_with_first_post(
            request.forum_id,
            author,
            &request.title,
            &request.first_post_text,
        )?)
    }

    /// Appends a post to an existing topic.
    ///
    /// # Contract
    /// - Validates all fields before touching the store.
    /// - Rejects with [`ServiceError::PersonNotFound`] /
    ///   [`ServiceError::TopicNotFound`] when the author or topic is
    ///   missing; the store is left unchanged.
    /// - Returns the created post id.
    pub fn create_post(&self, request: &CreatePostRequest) -> ServiceResult<PostId> {
        request.validate()?;
        let author = self.resolve_author(&request.author_username)?;
        if !self.repo.topic_exists(request.topic_id)? {
            return Err(ServiceError::TopicNotFound(request.topic_id));
        }
        Ok(self.repo.create_post(request.topic_id, author, &request.text)?)
    }

    /// Loads one topic with its posts numbered from 1 in insertion order.
    ///
    /// Rejects with [`ServiceError::TopicNotFound`] when no such topic
    /// exists.
    pub fn get_topic(&self, topic_id: TopicId) -> ServiceResult<TopicDetail> {
        match self.repo.get_topic(topic_id)? {
            Some(detail) => Ok(detail),
            None => Err(ServiceError::TopicNotFound(topic_id)),
        }
    }

    /// Counts the posts in one topic.
    ///
    /// Rejects with [`ServiceError::TopicNotFound`] when no such topic
    /// exists, so an empty count is never confused with a missing topic.
    pub fn count_posts(&self, topic_id: TopicId) -> ServiceResult<u32> {
        if !self.repo.topic_exists(topic_id)? {
            return Err(ServiceError::TopicNotFound(topic_id));
        }
        Ok(self.repo.count_posts(topic_id)?)
    }

    fn resolve_author(&self, username: &str) -> ServiceResult<PersonId> {
        match self.repo.person_id_by_username(username)? {
            Some(id) => Ok(id),
            None => Err(ServiceError::PersonNotFound(username.to_string())),
        }
    }
}
