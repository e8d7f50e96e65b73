//! Server configuration (command line with environment fallbacks).

use std::{path::PathBuf, time::Duration};

use clap::Parser;

/// Frames larger than this are rejected by the transport before decoding.
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 512 * 1024;

/// Todo CRUD server with WebSocket change notifications
#[derive(Parser, Debug, Clone)]
#[command(name = "todo-relay-server", version, about)]
pub struct ServerConfig {
    /// Bind address
    #[arg(long, env = "TODO_RELAY_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// SQLite database file; todos are kept in memory when omitted
    #[arg(long, env = "TODO_RELAY_DATABASE")]
    pub database: Option<PathBuf>,

    /// Frames buffered per WebSocket client before it is dropped as too slow
    #[arg(long, env = "TODO_RELAY_WS_QUEUE_CAPACITY", default_value_t = 64)]
    pub ws_queue_capacity: usize,

    /// Seconds a single WebSocket write may take before the client is dropped
    #[arg(long, env = "TODO_RELAY_WS_WRITE_TIMEOUT_SECS", default_value_t = 10)]
    pub ws_write_timeout_secs: u64,

    /// Maximum inbound WebSocket message size in bytes
    #[arg(long, env = "TODO_RELAY_MAX_MESSAGE_BYTES", default_value_t = DEFAULT_MAX_MESSAGE_BYTES)]
    pub max_message_bytes: usize,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "TODO_RELAY_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn websocket(&self) -> WebSocketSettings {
        WebSocketSettings {
            queue_capacity: self.ws_queue_capacity,
            write_timeout: Duration::from_secs(self.ws_write_timeout_secs),
            max_message_bytes: self.max_message_bytes,
        }
    }
}

/// Per-session WebSocket limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebSocketSettings {
    pub queue_capacity: usize,
    pub write_timeout: Duration,
    pub max_message_bytes: usize,
}

impl Default for WebSocketSettings {
    fn default() -> Self {
        Self {
            queue_capacity: 64,
            write_timeout: Duration::from_secs(10),
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
        }
    }
}
