//! WebSocket message DTOs.
//!
//! Every frame is a JSON envelope `{"type": <kind>, "payload": <any>}`.

use serde::{Deserialize, Serialize};

use crate::domain::{Todo, TodoEvent, event::DeletedTodo};

/// Untyped envelope, as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

/// Messages a client may send. Unknown kinds are kept for logging only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    /// Liveness probe; any payload is ignored.
    Ping,
    Unknown(String),
}

impl From<Envelope> for ClientMessage {
    fn from(envelope: Envelope) -> Self {
        match envelope.kind.as_str() {
            "ping" => ClientMessage::Ping,
            _ => ClientMessage::Unknown(envelope.kind),
        }
    }
}

impl ClientMessage {
    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Envelope>(text).map(Self::from)
    }

    pub fn decode_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice::<Envelope>(bytes).map(Self::from)
    }
}

/// Messages the server sends.
///
/// Unit variants serialize without a `payload` field, e.g. `{"type":"pong"}`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ServerMessage {
    Pong,
    TodoCreated(Todo),
    TodoUpdated(Todo),
    TodoDeleted(DeletedTodo),
}

impl ServerMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<&TodoEvent> for ServerMessage {
    fn from(event: &TodoEvent) -> Self {
        match event {
            TodoEvent::Created(todo) => ServerMessage::TodoCreated(todo.clone()),
            TodoEvent::Updated(todo) => ServerMessage::TodoUpdated(todo.clone()),
            TodoEvent::Deleted(id) => ServerMessage::TodoDeleted(DeletedTodo { id: *id }),
        }
    }
}
