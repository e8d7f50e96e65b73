//! Human-readable rendering of todos and notifications.

use crate::{api::Todo, watch::Notification};

pub fn format_todo(todo: &Todo) -> String {
    let description = if todo.description.is_empty() {
        "No description"
    } else {
        todo.description.as_str()
    };
    format!(
        "#{id} {title}\n  Description: {description}\n  Status: {status}\n  Due Date: {due}",
        id = todo.id,
        title = todo.title,
        status = todo.status,
        due = todo.due_date,
    )
}

pub fn format_todos(todos: &[Todo]) -> String {
    if todos.is_empty() {
        return "No tasks found.".to_string();
    }
    todos
        .iter()
        .map(format_todo)
        .collect::<Vec<_>>()
        .join("\n---\n")
}

/// One line per notification; `None` for frames not worth showing.
pub fn format_notification(notification: &Notification) -> Option<String> {
    match notification {
        Notification::Created(todo) => Some(format!("[created] #{} {}", todo.id, todo.title)),
        Notification::Updated(todo) => Some(format!(
            "[updated] #{} {} -> {}",
            todo.id, todo.title, todo.status
        )),
        Notification::Deleted { id } => Some(format!("[deleted] #{id}")),
        Notification::Pong => None,
        Notification::Unknown(kind) => Some(format!("[unknown] {kind}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(description: &str) -> Todo {
        Todo {
            id: 3,
            title: "Pay rent".to_string(),
            description: description.to_string(),
            status: "pending".to_string(),
            due_date: "2025-10-01".to_string(),
            created_at: "2025-09-01T00:00:00Z".to_string(),
            updated_at: "2025-09-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_format_todo() {
        let text = format_todo(&todo(""));
        assert!(text.starts_with("#3 Pay rent"));
        assert!(text.contains("Description: No description"));
        assert!(text.contains("Due Date: 2025-10-01"));
    }

    #[test]
    fn test_format_empty_list() {
        assert_eq!(format_todos(&[]), "No tasks found.");
    }

    #[test]
    fn test_format_notifications() {
        assert_eq!(
            format_notification(&Notification::Updated(todo("x"))).as_deref(),
            Some("[updated] #3 Pay rent -> pending")
        );
        assert_eq!(
            format_notification(&Notification::Deleted { id: 3 }).as_deref(),
            Some("[deleted] #3")
        );
        assert_eq!(format_notification(&Notification::Pong), None);
    }
}
