//! Domain layer error definitions.

use thiserror::Error;

use super::value_object::TodoId;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// TodoTitle validation error
    #[error("title cannot be empty")]
    TitleEmpty,

    /// TodoTitle too long error
    #[error("title cannot exceed {max} characters (got {actual})")]
    TitleTooLong { max: usize, actual: usize },

    /// TodoStatus validation error
    #[error("status cannot be empty")]
    StatusEmpty,

    /// TodoStatus too long error
    #[error("status cannot exceed {max} characters (got {actual})")]
    StatusTooLong { max: usize, actual: usize },

    /// DueDate is not a `YYYY-MM-DD` calendar date
    #[error("invalid date format (expected YYYY-MM-DD, got: {0})")]
    DueDateInvalidFormat(String),
}

/// Errors raised by repository implementations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("todo not found: {0}")]
    NotFound(TodoId),

    /// Underlying storage failure (I/O, SQL, corrupted row)
    #[error("storage error: {0}")]
    Storage(String),
}
