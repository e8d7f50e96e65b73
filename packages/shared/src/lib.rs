//! Shared utilities for the todo-relay server and client binaries.

pub mod logger;

pub use logger::setup_logger;
