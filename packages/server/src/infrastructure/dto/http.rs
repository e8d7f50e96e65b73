//! HTTP API request/response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::{DueDate, NewTodo, TodoStatus, TodoTitle, ValueObjectError};

/// Body of `POST /api/todos`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Defaults to `pending` when absent or empty
    #[serde(default)]
    pub status: Option<String>,
    pub due_date: String, // YYYY-MM-DD
}

impl CreateTodoRequest {
    pub fn into_new_todo(self) -> Result<NewTodo, ValueObjectError> {
        let status = match self.status.filter(|s| !s.trim().is_empty()) {
            Some(raw) => TodoStatus::new(raw)?,
            None => TodoStatus::default(),
        };
        Ok(NewTodo {
            title: TodoTitle::new(self.title)?,
            description: self.description,
            status,
            due_date: DueDate::parse(&self.due_date)?,
        })
    }
}

/// Body of `PUT /api/todos/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodoRequest {
    pub status: String,
}

/// Query string of `GET /api/todos`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTodosQuery {
    pub status: Option<String>,
}

impl ListTodosQuery {
    /// An empty `status=` means no filter.
    pub fn status_filter(self) -> Result<Option<TodoStatus>, ValueObjectError> {
        self.status
            .filter(|s| !s.is_empty())
            .map(TodoStatus::new)
            .transpose()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub connections: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(status: Option<&str>, due: &str) -> CreateTodoRequest {
        CreateTodoRequest {
            title: "Plan trip".to_string(),
            description: "book flights".to_string(),
            status: status.map(str::to_string),
            due_date: due.to_string(),
        }
    }

    #[test]
    fn test_status_defaults_to_pending() {
        // テスト項目: status が未指定・空文字の場合は pending になる
        for status in [None, Some(""), Some("  ")] {
            let new_todo = request(status, "2025-08-01").into_new_todo().unwrap();
            assert_eq!(new_todo.status.as_str(), "pending");
        }
    }

    #[test]
    fn test_explicit_status_is_kept() {
        let new_todo = request(Some("completed"), "2025-08-01").into_new_todo().unwrap();
        assert_eq!(new_todo.status.as_str(), "completed");
    }

    #[test]
    fn test_invalid_due_date_is_rejected() {
        // テスト項目: 日付形式が不正な場合はバリデーションエラーになる
        let result = request(None, "08/01/2025").into_new_todo();
        assert_eq!(
            result,
            Err(ValueObjectError::DueDateInvalidFormat("08/01/2025".to_string()))
        );
    }

    #[test]
    fn test_description_is_optional_in_json() {
        let parsed: CreateTodoRequest =
            serde_json::from_str(r#"{"title":"t","due_date":"2025-01-01"}"#).unwrap();
        assert_eq!(parsed.description, "");
        assert!(parsed.status.is_none());
    }

    #[test]
    fn test_empty_status_query_means_no_filter() {
        let query = ListTodosQuery {
            status: Some(String::new()),
        };
        assert_eq!(query.status_filter().unwrap(), None);
    }
}
