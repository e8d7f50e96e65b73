//! Handler modules for HTTP and WebSocket endpoints.

pub mod http;
pub mod websocket;

// Re-export HTTP handlers
pub use http::{create_todo, delete_todo, get_todo, health_check, list_todos, update_todo};

// Re-export WebSocket handlers
pub use websocket::websocket_handler;
