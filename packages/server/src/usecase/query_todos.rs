//! UseCases: read-only queries.

use std::sync::Arc;

use crate::domain::{Todo, TodoId, TodoRepository, TodoStatus};

use super::error::TodoUseCaseError;

pub struct ListTodosUseCase {
    repository: Arc<dyn TodoRepository>,
}

impl ListTodosUseCase {
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self { repository }
    }

    /// All todos newest first, or only those whose status equals `status`.
    pub async fn execute(&self, status: Option<TodoStatus>) -> Result<Vec<Todo>, TodoUseCaseError> {
        Ok(self.repository.list(status.as_ref()).await?)
    }
}

pub struct GetTodoUseCase {
    repository: Arc<dyn TodoRepository>,
}

impl GetTodoUseCase {
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: TodoId) -> Result<Todo, TodoUseCaseError> {
        Ok(self.repository.get(id).await?)
    }
}
