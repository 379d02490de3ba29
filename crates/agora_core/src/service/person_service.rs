//! Person use-case service.
//!
//! # Responsibility
//! - Register new members and serve person lookups.
//! - Enforce username uniqueness before insert.
//!
//! # Invariants
//! - Field validation runs before any repository access.
//! - Duplicate usernames are rejected without writing.

use crate::model::person::NewPerson;
use crate::model::validate::check_required;
use crate::model::PersonId;
use crate::repo::person_repo::{PersonRepository, PersonView};
use crate::service::{ServiceError, ServiceResult};
use std::collections::BTreeMap;

/// Person service facade over repository implementations.
pub struct PersonService<R: PersonRepository> {
    repo: R,
}

impl<R: PersonRepository> PersonService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new person.
    ///
    /// # Contract
    /// - Validates all fields before touching the store.
    /// - Rejects with [`ServiceError::UsernameTaken`] when the username is
    ///   already registered; the store is left unchanged.
    /// - Returns the created person id.
    pub fn create_person(&self, person: &NewPerson) -> ServiceResult<PersonId> {
        person.validate()?;
        if self.repo.username_exists(&person.username)? {
            return Err(ServiceError::UsernameTaken(person.username.clone()));
        }
        Ok(self.repo.create_person(person)?)
    }

    /// Looks up one person by username.
    ///
    /// Rejects with [`ServiceError::PersonNotFound`] when no such person
    /// exists.
    pub fn get_person(&self, username: &str) -> ServiceResult<PersonView> {
        check_required("username", username)?;
        match self.repo.get_person(username)? {
            Some(view) => Ok(view),
            None => Err(ServiceError::PersonNotFound(username.to_string())),
        }
    }

    /// Lists all registered users as a username-to-name map.
    ///
    /// The map is empty when nobody has registered yet.
    pub fn list_users(&self) -> ServiceResult<BTreeMap<String, String>> {
        Ok(self.repo.list_users()?)
    }
}
