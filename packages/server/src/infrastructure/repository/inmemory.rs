//! In-memory Todo Repository.
//!
//! Used when no database path is configured, and by tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::{NewTodo, RepositoryError, Todo, TodoId, TodoRepository, TodoStatus};

use super::sort_newest_first;

#[derive(Default)]
struct Store {
    last_id: i64,
    todos: BTreeMap<TodoId, Todo>,
}

/// In-memory implementation of `TodoRepository`.
#[derive(Default)]
pub struct InMemoryTodoRepository {
    store: RwLock<Store>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn create(&self, new_todo: NewTodo) -> Result<Todo, RepositoryError> {
        let mut store = self.store.write().await;
        store.last_id += 1;
        let todo = new_todo.into_todo(TodoId::new(store.last_id), Utc::now());
        store.todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn list(&self, status: Option<&TodoStatus>) -> Result<Vec<Todo>, RepositoryError> {
        let store = self.store.read().await;
        let mut todos: Vec<Todo> = store
            .todos
            .values()
            .filter(|todo| status.is_none_or(|s| &todo.status == s))
            .cloned()
            .collect();
        sort_newest_first(&mut todos);
        Ok(todos)
    }

    async fn get(&self, id: TodoId) -> Result<Todo, RepositoryError> {
        let store = self.store.read().await;
        store
            .todos
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound(id))
    }

    async fn update_status(
        &self,
        id: TodoId,
        status: TodoStatus,
    ) -> Result<Todo, RepositoryError> {
        let mut store = self.store.write().await;
        let todo = store
            .todos
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound(id))?;
        *todo = todo.with_status(status, Utc::now());
        Ok(todo.clone())
    }

    async fn delete(&self, id: TodoId) -> Result<(), RepositoryError> {
        let mut store = self.store.write().await;
        store
            .todos
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound(id))
    }
}
