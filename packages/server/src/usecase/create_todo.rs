//! UseCase: create a todo and announce it.

use std::sync::Arc;

use crate::domain::{NewTodo, Todo, TodoEvent, TodoEventPublisher, TodoRepository};

use super::error::TodoUseCaseError;

pub struct CreateTodoUseCase {
    repository: Arc<dyn TodoRepository>,
    publisher: Arc<dyn TodoEventPublisher>,
}

impl CreateTodoUseCase {
    pub fn new(
        repository: Arc<dyn TodoRepository>,
        publisher: Arc<dyn TodoEventPublisher>,
    ) -> Self {
        Self {
            repository,
            publisher,
        }
    }

    /// Persist the todo, then publish `todo_created` with the stored snapshot.
    pub async fn execute(&self, new_todo: NewTodo) -> Result<Todo, TodoUseCaseError> {
        let todo = self.repository.create(new_todo).await?;
        tracing::info!(todo_id = %todo.id, "todo created");
        self.publisher.publish(&TodoEvent::Created(todo.clone()));
        Ok(todo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            MockTodoEventPublisher, NewTodo, RepositoryError, TodoId, TodoStatus,
        },
        infrastructure::repository::InMemoryTodoRepository,
        usecase::test_support::new_todo,
    };
    use async_trait::async_trait;

    #[tokio::test]
    async fn test_create_publishes_created_event() {
        // テスト項目: 作成に成功すると todo_created が一度だけ発行される
        // given (前提条件):
        let repository = Arc::new(InMemoryTodoRepository::new());
        let mut publisher = MockTodoEventPublisher::new();
        publisher
            .expect_publish()
            .withf(|event| matches!(event, TodoEvent::Created(todo) if todo.id == TodoId::new(1)))
            .times(1)
            .return_const(());
        let usecase = CreateTodoUseCase::new(repository.clone(), Arc::new(publisher));

        // when (操作):
        let result = usecase.execute(new_todo("Buy milk")).await;

        // then (期待する結果):
        let todo = result.unwrap();
        assert_eq!(todo.title.as_str(), "Buy milk");
        assert_eq!(todo.status, TodoStatus::default());
        assert_eq!(repository.get(todo.id).await.unwrap(), todo);
    }

    struct FailingRepository;

    #[async_trait]
    impl TodoRepository for FailingRepository {
        async fn create(&self, _new_todo: NewTodo) -> Result<Todo, RepositoryError> {
            Err(RepositoryError::Storage("disk full".to_string()))
        }
        async fn list(&self, _: Option<&TodoStatus>) -> Result<Vec<Todo>, RepositoryError> {
            Err(RepositoryError::Storage("disk full".to_string()))
        }
        async fn get(&self, id: TodoId) -> Result<Todo, RepositoryError> {
            Err(RepositoryError::NotFound(id))
        }
        async fn update_status(&self, id: TodoId, _: TodoStatus) -> Result<Todo, RepositoryError> {
            Err(RepositoryError::NotFound(id))
        }
        async fn delete(&self, id: TodoId) -> Result<(), RepositoryError> {
            Err(RepositoryError::NotFound(id))
        }
    }

    #[tokio::test]
    async fn test_storage_failure_publishes_nothing() {
        // テスト項目: 永続化に失敗した場合はイベントを発行しない
        // given (前提条件):
        let mut publisher = MockTodoEventPublisher::new();
        publisher.expect_publish().never();
        let usecase = CreateTodoUseCase::new(Arc::new(FailingRepository), Arc::new(publisher));

        // when (操作):
        let result = usecase.execute(new_todo("Buy milk")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(TodoUseCaseError::Storage(_))));
    }
}
