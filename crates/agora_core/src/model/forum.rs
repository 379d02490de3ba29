//! Forum entity input.

use crate::model::validate::{check_max_len, check_required, ValidationError, MAX_TITLE_LEN};
use serde::{Deserialize, Serialize};

/// Input for creating one forum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewForum {
    /// Unique forum title.
    pub title: String,
}

impl NewForum {
    /// Creates a forum input from a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Checks the forum title: required, at most 100 characters.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required("title", &self.title)?;
        check_max_len("title", &self.title, MAX_TITLE_LEN)?;
        Ok(())
    }
}
