//! Core domain models for the todo application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_object::{DueDate, TodoId, TodoStatus, TodoTitle};

/// A persisted todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: TodoTitle,
    pub description: String,
    pub status: TodoStatus,
    pub due_date: DueDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Returns a copy with a new status and a refreshed `updated_at`.
    pub fn with_status(&self, status: TodoStatus, now: DateTime<Utc>) -> Self {
        Self {
            status,
            updated_at: now,
            ..self.clone()
        }
    }
}

/// Validated input for creating a todo. The repository assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: TodoTitle,
    pub description: String,
    pub status: TodoStatus,
    pub due_date: DueDate,
}

impl NewTodo {
    /// Materialize the entity once storage has assigned an id.
    pub fn into_todo(self, id: TodoId, now: DateTime<Utc>) -> Todo {
        Todo {
            id,
            title: self.title,
            description: self.description,
            status: self.status,
            due_date: self.due_date,
            created_at: now,
            updated_at: now,
        }
    }
}
