//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::StreamExt;
use tokio::{net::TcpListener, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, tungstenite::Message};

use todo_relay_server::{
    build_router, config::WebSocketSettings,
    infrastructure::repository::InMemoryTodoRepository, ui::state::AppState,
};

pub type WsClient = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Server running in-process on an ephemeral port; stopped on drop.
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(WebSocketSettings::default()).await
    }

    pub async fn start_with(settings: WebSocketSettings) -> Self {
        let state = Arc::new(AppState::new(
            Arc::new(InMemoryTodoRepository::new()),
            settings,
        ));
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, build_router(state))
                .await
                .expect("Test server failed");
        });
        Self { addr, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub async fn connect(&self) -> WsClient {
        let (ws, _response) = tokio_tungstenite::connect_async(self.ws_url())
            .await
            .expect("Failed to connect WebSocket");
        ws
    }

    /// Current registry size as reported by the health endpoint.
    pub async fn connections(&self) -> u64 {
        let body: serde_json::Value = reqwest::get(format!("{}/api/health", self.base_url()))
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("Failed to parse JSON");
        body["connections"].as_u64().expect("connections missing")
    }

    /// Poll until the registry holds `expected` connections.
    pub async fn wait_for_connections(&self, expected: u64) {
        for _ in 0..100 {
            if self.connections().await == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("registry never reached {expected} connections");
    }

    pub async fn create_todo(&self, title: &str) -> serde_json::Value {
        let response = reqwest::Client::new()
            .post(format!("{}/api/todos", self.base_url()))
            .json(&serde_json::json!({
                "title": title,
                "description": "integration",
                "due_date": "2025-09-30",
            }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 201);
        response.json().await.expect("Failed to parse JSON")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Next text frame, as raw string. Panics after a timeout.
pub async fn recv_text(ws: &mut WsClient) -> String {
    loop {
        let next = tokio::time::timeout(Duration::from_secs(2), ws.next())
            .await
            .expect("Timed out waiting for a frame")
            .expect("Stream ended")
            .expect("WebSocket error");
        if let Message::Text(text) = next {
            return text.as_str().to_string();
        }
    }
}

pub async fn recv_json(ws: &mut WsClient) -> serde_json::Value {
    serde_json::from_str(&recv_text(ws).await).expect("Frame is not JSON")
}
