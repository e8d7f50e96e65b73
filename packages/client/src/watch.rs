//! Live subscription to the server's WebSocket channel.
//!
//! Keeps one connection open, sends an application-level `ping` on a fixed
//! interval, and reconnects with exponential backoff when the connection drops.

use std::{future::Future, time::Duration};

use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::time::{Instant, interval_at};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

use crate::{api::Todo, error::ClientError};

const PING: &str = r#"{"type":"ping"}"#;

/// A decoded server frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Created(Todo),
    Updated(Todo),
    Deleted { id: i64 },
    Pong,
    Unknown(String),
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: serde_json::Value,
}

#[derive(Deserialize)]
struct DeletedPayload {
    id: i64,
}

impl Notification {
    pub fn parse(text: &str) -> Result<Self, ClientError> {
        let envelope: Envelope = serde_json::from_str(text)?;
        Ok(match envelope.kind.as_str() {
            "todo_created" => Notification::Created(serde_json::from_value(envelope.payload)?),
            "todo_updated" => Notification::Updated(serde_json::from_value(envelope.payload)?),
            "todo_deleted" => {
                let DeletedPayload { id } = serde_json::from_value(envelope.payload)?;
                Notification::Deleted { id }
            }
            "pong" => Notification::Pong,
            _ => Notification::Unknown(envelope.kind),
        })
    }
}

/// Derive the WebSocket endpoint from the HTTP base URL.
pub fn websocket_url(base_url: &str) -> Result<String, ClientError> {
    let base = base_url.trim_end_matches('/');
    let ws_base = if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if base.starts_with("ws://") || base.starts_with("wss://") {
        base.to_string()
    } else {
        return Err(ClientError::InvalidUrl(base_url.to_string()));
    };
    Ok(format!("{ws_base}/ws"))
}

/// Reconnect schedule: `base`, `2 * base`, `4 * base`, ... for at most
/// `max_attempts` consecutive failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    pub base: Duration,
    pub max_attempts: u32,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            base: Duration::from_secs(1),
            max_attempts: 5,
        }
    }
}

impl Backoff {
    /// Delay before reconnect attempt `attempt` (1-based), or `None` when exhausted.
    pub fn delay(&self, attempt: u32) -> Option<Duration> {
        if attempt == 0 || attempt > self.max_attempts {
            return None;
        }
        Some(self.base * 2u32.saturating_pow(attempt - 1))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WatchOptions {
    pub ping_interval: Duration,
    pub backoff: Backoff,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            ping_interval: Duration::from_secs(30),
            backoff: Backoff::default(),
        }
    }
}

enum SessionEnd {
    Shutdown,
    Disconnected,
}

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Watch until `shutdown` resolves or reconnection gives up.
///
/// The attempt counter resets after every successful connect.
pub async fn watch<S, F>(
    url: &str,
    options: WatchOptions,
    shutdown: S,
    mut on_notification: F,
) -> Result<(), ClientError>
where
    S: Future<Output = ()>,
    F: FnMut(Notification),
{
    tokio::pin!(shutdown);
    let mut attempt = 0;

    loop {
        let connected = tokio::select! {
            result = connect_async(url) => result,
            _ = &mut shutdown => return Ok(()),
        };

        match connected {
            Ok((ws, _response)) => {
                tracing::info!("WebSocket connected to {}", url);
                attempt = 0;
                match session(ws, options.ping_interval, &mut shutdown, &mut on_notification).await
                {
                    SessionEnd::Shutdown => return Ok(()),
                    SessionEnd::Disconnected => tracing::warn!("WebSocket disconnected"),
                }
            }
            Err(e) => tracing::warn!("Error connecting to WebSocket: {}", e),
        }

        attempt += 1;
        let Some(delay) = options.backoff.delay(attempt) else {
            tracing::error!("Max reconnection attempts reached");
            return Err(ClientError::ReconnectExhausted(options.backoff.max_attempts));
        };
        tracing::info!("Attempting to reconnect in {:?}...", delay);
        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = &mut shutdown => return Ok(()),
        }
    }
}

async fn session<S, F>(
    mut ws: WsStream,
    ping_interval: Duration,
    shutdown: &mut std::pin::Pin<&mut S>,
    on_notification: &mut F,
) -> SessionEnd
where
    S: Future<Output = ()>,
    F: FnMut(Notification),
{
    let mut ticker = interval_at(Instant::now() + ping_interval, ping_interval);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = ws.send(Message::text(PING)).await {
                    tracing::warn!("Failed to send ping: {}", e);
                    return SessionEnd::Disconnected;
                }
            }
            msg = ws.next() => match msg {
                Some(Ok(Message::Text(text))) => match Notification::parse(text.as_str()) {
                    Ok(notification) => on_notification(notification),
                    Err(e) => tracing::warn!("Error parsing WebSocket message: {}", e),
                },
                Some(Ok(Message::Close(_))) | None => return SessionEnd::Disconnected,
                Some(Err(e)) => {
                    tracing::warn!("WebSocket error: {}", e);
                    return SessionEnd::Disconnected;
                }
                Some(Ok(_)) => {}
            },
            _ = shutdown.as_mut() => {
                let _ = ws.close(None).await;
                return SessionEnd::Shutdown;
            }
        }
    }
}
