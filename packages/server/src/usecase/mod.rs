//! UseCase layer.
//!
//! Called from the UI layer with validated domain values; talks to the
//! repository and publishes one change event per successful mutation.

pub mod create_todo;
pub mod delete_todo;
pub mod error;
pub mod query_todos;
pub mod update_todo_status;

pub use create_todo::CreateTodoUseCase;
pub use delete_todo::DeleteTodoUseCase;
pub use error::TodoUseCaseError;
pub use query_todos::{GetTodoUseCase, ListTodosUseCase};
pub use update_todo_status::UpdateTodoStatusUseCase;
