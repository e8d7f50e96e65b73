//! Route table.

use std::sync::Arc;

use axum::{
    Router,
    http::{Method, header},
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::{handler, state::AppState};

/// Path of the WebSocket notification channel.
pub const WEBSOCKET_PATH: &str = "/ws";

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/health", get(handler::health_check))
        .route(
            "/api/todos",
            get(handler::list_todos).post(handler::create_todo),
        )
        .route(
            "/api/todos/{id}",
            get(handler::get_todo)
                .put(handler::update_todo)
                .delete(handler::delete_todo),
        )
        .route(WEBSOCKET_PATH, get(handler::websocket_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
