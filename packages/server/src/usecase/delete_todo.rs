//! UseCase: delete a todo and announce it.

use std::sync::Arc;

use crate::domain::{TodoEvent, TodoEventPublisher, TodoId, TodoRepository};

use super::error::TodoUseCaseError;

pub struct DeleteTodoUseCase {
    repository: Arc<dyn TodoRepository>,
    publisher: Arc<dyn TodoEventPublisher>,
}

impl DeleteTodoUseCase {
    pub fn new(
        repository: Arc<dyn TodoRepository>,
        publisher: Arc<dyn TodoEventPublisher>,
    ) -> Self {
        Self {
            repository,
            publisher,
        }
    }

    /// Delete the todo; subscribers receive `todo_deleted` with `{"id": ..}`.
    pub async fn execute(&self, id: TodoId) -> Result<(), TodoUseCaseError> {
        self.repository.delete(id).await?;
        tracing::info!(todo_id = %id, "todo deleted");
        self.publisher.publish(&TodoEvent::Deleted(id));
        Ok(())
    }
}
