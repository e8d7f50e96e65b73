//! Change notifications emitted after a successful mutation.

use serde::Serialize;

use super::{entity::Todo, value_object::TodoId};

/// A committed change to the todo table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoEvent {
    Created(Todo),
    Updated(Todo),
    Deleted(TodoId),
}

/// Payload sent for a deletion, since the entity no longer exists.
#[derive(Debug, Clone, Serialize)]
pub struct DeletedTodo {
    pub id: TodoId,
}

impl TodoEvent {
    /// Change-type label used as the envelope `type`.
    pub fn label(&self) -> &'static str {
        match self {
            TodoEvent::Created(_) => "todo_created",
            TodoEvent::Updated(_) => "todo_updated",
            TodoEvent::Deleted(_) => "todo_deleted",
        }
    }
}

/// Sink for todo change notifications.
///
/// Delivery is best-effort: implementations never report partial failure to
/// the caller.
#[cfg_attr(test, mockall::automock)]
pub trait TodoEventPublisher: Send + Sync {
    fn publish(&self, event: &TodoEvent);
}
