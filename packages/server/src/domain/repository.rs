//! Repository trait for todo persistence.
//!
//! The domain layer defines the interface; `infrastructure::repository`
//! provides the implementations (dependency inversion).

use async_trait::async_trait;

use super::{
    entity::{NewTodo, Todo},
    error::RepositoryError,
    value_object::{TodoId, TodoStatus},
};

#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Insert a todo and return it with its assigned id and timestamps.
    async fn create(&self, new_todo: NewTodo) -> Result<Todo, RepositoryError>;

    /// List todos, newest first, optionally filtered by exact status.
    async fn list(&self, status: Option<&TodoStatus>) -> Result<Vec<Todo>, RepositoryError>;

    async fn get(&self, id: TodoId) -> Result<Todo, RepositoryError>;

    /// Set the status and refresh `updated_at`.
    async fn update_status(&self, id: TodoId, status: TodoStatus)
    -> Result<Todo, RepositoryError>;

    async fn delete(&self, id: TodoId) -> Result<(), RepositoryError>;
}
