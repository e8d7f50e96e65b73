//! WebSocket connection handlers.
//!
//! Each upgraded socket is split into a reader task (the inbound loop) and a
//! writer task that drains the connection's outbound queue. When the reader
//! finishes the writer gets one bounded chance to send a close frame; when the
//! writer finishes the reader is aborted. The registration guard is dropped
//! afterwards either way.

use std::{fmt::Display, sync::Arc, time::Duration};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{Sink, SinkExt, Stream, StreamExt};

use crate::{
    infrastructure::{
        dto::websocket::{ClientMessage, ServerMessage},
        realtime::{Connection, Outbound, SendError},
    },
    ui::state::AppState,
};

/// Why an inbound loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundExit {
    /// The client sent a close frame.
    ClientClosed,
    /// The stream ended without a close frame.
    StreamEnded,
    /// Read failed (reset, protocol violation, oversized message).
    TransportError,
    /// The pong could not be queued; the session is dropped like a failed broadcast.
    PongUndeliverable,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let max_bytes = state.websocket.max_message_bytes;
    ws.max_message_size(max_bytes)
        .max_frame_size(max_bytes)
        .on_failed_upgrade(|e| tracing::warn!("WebSocket upgrade failed: {}", e))
        .on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, receiver) = socket.split();
    let (connection, outbound) = Connection::open(state.websocket.queue_capacity);
    let connection_id = connection.id();

    let guard = state.registry.register_scoped(connection.clone());
    tracing::info!(
        %connection_id,
        connections = state.registry.len(),
        "client connected"
    );

    let write_timeout = state.websocket.write_timeout;
    let closer = connection.clone();
    let mut send_task = tokio::spawn(run_outbound(sender, outbound, write_timeout));
    let mut recv_task = tokio::spawn(async move { run_inbound(receiver, &connection).await });

    let exit = tokio::select! {
        exit = &mut recv_task => {
            // Let the writer send its close frame, which also flushes the
            // close reply queued by the transport.
            closer.close();
            if tokio::time::timeout(write_timeout, &mut send_task).await.is_err() {
                send_task.abort();
            }
            exit.ok()
        }
        _ = &mut send_task => {
            recv_task.abort();
            None
        }
    };

    drop(guard);
    tracing::info!(
        %connection_id,
        reason = ?exit,
        connections = state.registry.len(),
        "client disconnected"
    );
}

/// Read frames until the client goes away.
///
/// Malformed envelopes are logged and skipped; only transport-level outcomes
/// end the loop.
pub async fn run_inbound<S, E>(mut receiver: S, connection: &Connection) -> InboundExit
where
    S: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
{
    let connection_id = connection.id();

    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!(%connection_id, "WebSocket read error: {}", e);
                return InboundExit::TransportError;
            }
        };

        let decoded = match msg {
            Message::Text(text) => ClientMessage::decode(text.as_str()),
            Message::Binary(bytes) => ClientMessage::decode_slice(&bytes),
            Message::Close(_) => {
                tracing::debug!(%connection_id, "client requested close");
                return InboundExit::ClientClosed;
            }
            // Protocol-level ping/pong is answered by the transport
            Message::Ping(_) | Message::Pong(_) => continue,
        };

        match decoded {
            Ok(ClientMessage::Ping) => {
                if let Err(e) = reply_pong(connection) {
                    tracing::warn!(%connection_id, "failed to queue pong: {}", e);
                    return InboundExit::PongUndeliverable;
                }
            }
            Ok(ClientMessage::Unknown(kind)) => {
                tracing::debug!(%connection_id, kind = %kind, "ignoring message");
            }
            Err(e) => {
                tracing::warn!(%connection_id, "failed to parse message as JSON: {}", e);
            }
        }
    }

    InboundExit::StreamEnded
}

fn reply_pong(connection: &Connection) -> Result<(), SendError> {
    match ServerMessage::Pong.to_json() {
        Ok(json) => connection.try_send(json.into()),
        Err(e) => {
            tracing::error!("failed to serialize pong: {}", e);
            Ok(())
        }
    }
}

/// Drain the outbound queue into the socket.
///
/// Stops on the first failed or timed-out write. When the queue is closed from
/// the registry side, a close frame is sent before returning.
pub async fn run_outbound<S>(mut sender: S, mut outbound: Outbound, write_timeout: Duration)
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    while let Some(frame) = outbound.next().await {
        let message = Message::Text(frame.to_string().into());
        match tokio::time::timeout(write_timeout, sender.send(message)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::warn!("WebSocket write failed: {}", e);
                return;
            }
            Err(_) => {
                tracing::warn!(?write_timeout, "WebSocket write timed out");
                return;
            }
        }
    }

    let _ = tokio::time::timeout(write_timeout, sender.send(Message::Close(None))).await;
}
