//! Person entity input.
//!
//! # Responsibility
//! - Carry the fields for a person insert.
//! - Enforce person field constraints before persistence.
//!
//! # Invariants
//! - `username` is the unique public handle; uniqueness itself is checked
//!   against the store, not here.
//! - `student_id` is optional, but an empty string is never accepted.

use crate::model::validate::{
    check_max_len, check_required, ValidationError, MAX_NAME_LEN, MAX_STUDENT_ID_LEN,
    MAX_USERNAME_LEN,
};
use serde::{Deserialize, Serialize};

/// Input for creating one person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPerson {
    /// Display name shown as post author.
    pub name: String,
    /// Unique login handle.
    pub username: String,
    /// Optional external student identifier.
    pub student_id: Option<String>,
}

impl NewPerson {
    /// Creates a person input from its parts.
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        student_id: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            student_id,
        }
    }

    /// Checks all person field constraints.
    ///
    /// # Contract
    /// - `student_id` may be absent, but never empty, and holds at most
    ///   10 characters.
    /// - `name` is required, at most 100 characters.
    /// - `username` is required, at most 10 characters.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(student_id) = self.student_id.as_deref() {
            if student_id.is_empty() {
                return Err(ValidationError::EmptyOptional {
                    field: "student id",
                });
            }
            check_max_len("student id", student_id, MAX_STUDENT_ID_LEN)?;
        }
        check_required("name", &self.name)?;
        check_max_len("name", &self.name, MAX_NAME_LEN)?;
        check_required("username", &self.username)?;
        check_max_len("username", &self.username, MAX_USERNAME_LEN)?;
        Ok(())
    }
}
