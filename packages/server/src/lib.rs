//! Todo CRUD backend with WebSocket change notifications.
//!
//! REST handlers persist todos through a [`domain::TodoRepository`]; every
//! committed mutation is fanned out to connected WebSocket clients as a
//! `{"type", "payload"}` envelope.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use ui::{build_router, run as run_server};
