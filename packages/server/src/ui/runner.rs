//! Server startup.

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::{
    config::ServerConfig,
    domain::TodoRepository,
    error::ServerError,
    infrastructure::repository::{InMemoryTodoRepository, SqliteTodoRepository},
};

use super::{router::build_router, signal::shutdown_signal, state::AppState};

/// Choose the storage backend from the configuration.
pub fn open_repository(config: &ServerConfig) -> Result<Arc<dyn TodoRepository>, ServerError> {
    match &config.database {
        Some(path) => Ok(Arc::new(SqliteTodoRepository::open(path)?)),
        None => {
            tracing::warn!("No database configured, todos are kept in memory only");
            Ok(Arc::new(InMemoryTodoRepository::new()))
        }
    }
}

/// Build every dependency, bind, and serve until a shutdown signal arrives.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let repository = open_repository(&config)?;
    let state = Arc::new(AppState::new(repository, config.websocket()));
    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    tracing::info!("Server stopped");
    Ok(())
}
