//! Repository implementations.
//!
//! Concrete implementations of the `TodoRepository` trait defined by the
//! domain layer. Use cases depend on the trait only (dependency inversion).

pub mod inmemory;
pub mod sqlite;

pub use inmemory::InMemoryTodoRepository;
pub use sqlite::SqliteTodoRepository;

use std::cmp::Reverse;

use crate::domain::Todo;

/// Listing order shared by every backend: newest first, ties by id.
pub(crate) fn sort_newest_first(todos: &mut [Todo]) {
    todos.sort_by_key(|todo| Reverse((todo.created_at, todo.id)));
}
