//! Command-line client for the todo-relay server.
//!
//! REST commands go through [`api::ApiClient`]; `watch` subscribes to the
//! WebSocket channel and prints change notifications as they arrive.

pub mod api;
pub mod cli;
pub mod display;
pub mod error;
pub mod watch;

pub use cli::{Cli, Command, run_client};
pub use error::ClientError;
