//! Field validation rules shared by all mutation inputs.
//!
//! # Responsibility
//! - Define the per-field length limits of the forum schema.
//! - Reject empty required fields and over-length values before any SQL runs.
//!
//! # Invariants
//! - Limits count characters, not bytes.
//! - Values are compared as given; no trimming or normalization happens here.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum characters in a person's display name.
pub const MAX_NAME_LEN: usize = 100;
/// Maximum characters in a username.
pub const MAX_USERNAME_LEN: usize = 10;
/// Maximum characters in a student id.
pub const MAX_STUDENT_ID_LEN: usize = 10;
/// Maximum characters in a forum or topic title.
pub const MAX_TITLE_LEN: usize = 100;
/// Maximum characters in a post body.
pub const MAX_POST_TEXT_LEN: usize = 8000;

/// A violated input constraint, reported before any database access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was empty.
    Empty { field: &'static str },
    /// An optional field was present but empty.
    EmptyOptional { field: &'static str },
    /// A field exceeded its schema length limit.
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} cannot be empty"),
            Self::EmptyOptional { field } => {
                write!(f, "{field} may be omitted but cannot be empty")
            }
            Self::TooLong { field, max, actual } => {
                write!(f, "{field} must be at most {max} characters, got {actual}")
            }
        }
    }
}

impl Error for ValidationError {}

/// Rejects empty values for a required field.
pub fn check_required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

/// Rejects values longer than `max` characters.
pub fn check_max_len(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong { field, max, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{check_max_len, check_required, ValidationError};

    #[test]
    fn check_required_rejects_empty_only() {
        assert!(check_required("name", "Ada").is_ok());
        // Whitespace counts as content; inputs are compared as given.
        assert!(check_required("name", " ").is_ok());
        assert_eq!(
            check_required("name", ""),
            Err(ValidationError::Empty { field: "name" })
        );
    }

    #[test]
    fn check_max_len_counts_characters_not_bytes() {
        // Five characters, seven bytes.
        assert!(check_max_len("title", "héllö", 5).is_ok());
        assert_eq!(
            check_max_len("title", "héllö", 4),
            Err(ValidationError::TooLong {
                field: "title",
                max: 4,
                actual: 5
            })
        );
    }

    #[test]
    fn messages_name_the_violated_constraint() {
        let empty = ValidationError::Empty { field: "username" };
        assert_eq!(empty.to_string(), "username cannot be empty");

        let optional = ValidationError::EmptyOptional {
            field: "student id",
        };
        assert!(optional.to_string().contains("may be omitted"));

        let long = ValidationError::TooLong {
            field: "post text",
            max: 8000,
            actual: 8001,
        };
        assert!(long.to_string().contains("at most 8000"));
    }
}
