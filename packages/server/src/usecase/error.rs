//! UseCase layer error definitions.

use thiserror::Error;

use crate::domain::{RepositoryError, TodoId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TodoUseCaseError {
    #[error("todo not found: {0}")]
    NotFound(TodoId),

    #[error(transparent)]
    Storage(RepositoryError),
}

impl From<RepositoryError> for TodoUseCaseError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => TodoUseCaseError::NotFound(id),
            other => TodoUseCaseError::Storage(other),
        }
    }
}
