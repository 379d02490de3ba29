//! Domain model for the forum core.
//!
//! # Responsibility
//! - Define the entity inputs accepted by mutation operations.
//! - Own the validation rules applied before any database access.
//!
//! # Invariants
//! - Every stored entity is identified by a stable integer row id.
//! - Inputs are validated against field limits before they reach SQL.

pub mod forum;
pub mod person;
pub mod validate;

/// Stable identifier for a person row.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type PersonId = i64;

/// Stable identifier for a forum row.
pub type ForumId = i64;

/// Stable identifier for a topic row.
pub type TopicId = i64;

/// Stable identifier for a post row.
pub type PostId = i64;
