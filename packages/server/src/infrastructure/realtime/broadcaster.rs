//! Event fan-out to connected WebSocket clients.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    domain::{TodoEvent, TodoEventPublisher},
    infrastructure::dto::websocket::ServerMessage,
};

use super::{
    connection::{ConnectionId, Frame},
    registry::ConnectionRegistry,
};

/// Outcome of one fan-out pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: usize,
    pub pruned: usize,
}

/// Pushes server messages to every registered connection.
///
/// Delivery is best-effort and unordered across connections. A connection
/// whose queue rejects the frame is removed from the registry and closed; the
/// rest of the pass is unaffected.
#[derive(Debug, Clone)]
pub struct Broadcaster {
    registry: Arc<ConnectionRegistry>,
}

impl Broadcaster {
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    pub fn broadcast(&self, message: &ServerMessage) -> BroadcastReport {
        match message.to_json() {
            Ok(json) => self.broadcast_frame(Frame::from(json)),
            Err(e) => {
                warn!(error = %e, "failed to serialize broadcast message");
                BroadcastReport::default()
            }
        }
    }

    /// Fan out an already serialized frame.
    pub fn broadcast_frame(&self, frame: Frame) -> BroadcastReport {
        let mut delivered = 0;
        let mut dead: Vec<ConnectionId> = Vec::new();

        // Shared lock only: removals are deferred until the pass is done.
        self.registry.for_each(|connection| {
            match connection.try_send(Arc::clone(&frame)) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    warn!(connection_id = %connection.id(), error = %e, "dropping connection after failed broadcast");
                    dead.push(connection.id());
                }
            }
        });

        let pruned = self.registry.unregister_all(&dead);
        for connection in &pruned {
            connection.close();
        }

        BroadcastReport {
            delivered,
            pruned: pruned.len(),
        }
    }
}

impl TodoEventPublisher for Broadcaster {
    fn publish(&self, event: &TodoEvent) {
        let report = self.broadcast(&ServerMessage::from(event));
        debug!(
            event = event.label(),
            recipients = report.delivered,
            pruned = report.pruned,
            "broadcast todo event"
        );
    }
}
