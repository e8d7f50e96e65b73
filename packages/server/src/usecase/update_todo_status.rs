//! UseCase: change a todo's status and announce it.

use std::sync::Arc;

use crate::domain::{Todo, TodoEvent, TodoEventPublisher, TodoId, TodoRepository, TodoStatus};

use super::error::TodoUseCaseError;

pub struct UpdateTodoStatusUseCase {
    repository: Arc<dyn TodoRepository>,
    publisher: Arc<dyn TodoEventPublisher>,
}

impl UpdateTodoStatusUseCase {
    pub fn new(
        repository: Arc<dyn TodoRepository>,
        publisher: Arc<dyn TodoEventPublisher>,
    ) -> Self {
        Self {
            repository,
            publisher,
        }
    }

    pub async fn execute(&self, id: TodoId, status: TodoStatus) -> Result<Todo, TodoUseCaseError> {
        let todo = self.repository.update_status(id, status).await?;
        tracing::info!(todo_id = %todo.id, status = %todo.status, "todo status updated");
        self.publisher.publish(&TodoEvent::Updated(todo.clone()));
        Ok(todo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::MockTodoEventPublisher, infrastructure::repository::InMemoryTodoRepository,
        usecase::test_support::new_todo,
    };

    #[tokio::test]
    async fn test_update_publishes_updated_snapshot() {
        // テスト項目: 更新に成功すると更新後のスナップショットで todo_updated が発行される
        // given (前提条件):
        let repository = Arc::new(InMemoryTodoRepository::new());
        let todo = repository.create(new_todo("a")).await.unwrap();
        let mut publisher = MockTodoEventPublisher::new();
        publisher
            .expect_publish()
            .withf(|event| {
                matches!(event, TodoEvent::Updated(t) if t.status.as_str() == "completed")
            })
            .times(1)
            .return_const(());
        let usecase = UpdateTodoStatusUseCase::new(repository, Arc::new(publisher));

        // when (操作):
        let result = usecase
            .execute(todo.id, TodoStatus::new("completed".to_string()).unwrap())
            .await;

        // then (期待する結果):
        let updated = result.unwrap();
        assert_eq!(updated.id, todo.id);
        assert_eq!(updated.status.as_str(), "completed");
    }

    #[tokio::test]
    async fn test_update_missing_publishes_nothing() {
        // テスト項目: 存在しない ID の更新は NotFound でイベントは発行されない
        // given (前提条件):
        let mut publisher = MockTodoEventPublisher::new();
        publisher.expect_publish().never();
        let usecase = UpdateTodoStatusUseCase::new(
            Arc::new(InMemoryTodoRepository::new()),
            Arc::new(publisher),
        );

        // when (操作):
        let result = usecase.execute(TodoId::new(9), TodoStatus::default()).await;

        // then (期待する結果):
        assert_eq!(result, Err(TodoUseCaseError::NotFound(TodoId::new(9))));
    }
}
