//! Domain layer for the todo application.
//!
//! This module contains the todo entity, its value objects, the change events
//! emitted on mutation, and the traits the outer layers implement.

pub mod entity;
pub mod error;
pub mod event;
pub mod repository;
pub mod value_object;

pub use entity::{NewTodo, Todo};
pub use error::{RepositoryError, ValueObjectError};
pub use event::{TodoEvent, TodoEventPublisher};
#[cfg(test)]
pub use event::MockTodoEventPublisher;
pub use repository::TodoRepository;
pub use value_object::{DueDate, TodoId, TodoStatus, TodoTitle};
