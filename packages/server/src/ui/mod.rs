//! HTTP / WebSocket surface of the server.

mod handler;
pub mod router;
mod runner;
mod signal;
pub mod state;

pub use router::build_router;
pub use runner::run;
