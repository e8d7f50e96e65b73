//! Shared application state.

use std::sync::Arc;

use crate::{
    config::WebSocketSettings,
    domain::{TodoEventPublisher, TodoRepository},
    infrastructure::realtime::{Broadcaster, ConnectionRegistry},
};

/// Dependencies handed to every handler; built once at startup.
pub struct AppState {
    /// Repository (abstraction over the storage backend)
    pub repository: Arc<dyn TodoRepository>,
    /// Receives one event per committed mutation
    pub publisher: Arc<dyn TodoEventPublisher>,
    /// Open WebSocket sessions
    pub registry: Arc<ConnectionRegistry>,
    pub websocket: WebSocketSettings,
}

impl AppState {
    /// Wire the repository to a broadcaster over a fresh registry.
    pub fn new(repository: Arc<dyn TodoRepository>, websocket: WebSocketSettings) -> Self {
        let registry = Arc::new(ConnectionRegistry::new());
        let publisher = Arc::new(Broadcaster::new(Arc::clone(&registry)));
        Self {
            repository,
            publisher,
            registry,
            websocket,
        }
    }
}
