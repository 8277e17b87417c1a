//! Error types for board domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// The identifier is not a valid UUID.
    #[error("invalid identifier '{0}'")]
    InvalidIdentifier(String),

    /// A position does not fit the persisted integer range.
    #[error("position {0} is out of range")]
    PositionOutOfRange(i64),
}
