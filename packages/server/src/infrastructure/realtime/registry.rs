//! Set of currently open connections.
//!
//! A reader/writer lock guards the set: any number of broadcast passes may
//! iterate together, while membership changes are exclusive. The lock is never
//! held across an `.await`.

use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;

use super::connection::{Connection, ConnectionId};

#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<ConnectionId, Connection>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection. Returns `false` (and changes nothing) if already present.
    pub fn register(&self, connection: Connection) -> bool {
        let mut connections = self.connections.write();
        if connections.contains_key(&connection.id()) {
            return false;
        }
        connections.insert(connection.id(), connection);
        true
    }

    /// Register and return a guard that unregisters on drop.
    pub fn register_scoped(self: &Arc<Self>, connection: Connection) -> RegistrationGuard {
        let id = connection.id();
        self.register(connection);
        RegistrationGuard {
            registry: Arc::clone(self),
            id,
        }
    }

    /// Remove a connection. No-op if absent.
    pub fn unregister(&self, id: ConnectionId) -> Option<Connection> {
        self.connections.write().remove(&id)
    }

    /// Remove a batch of connections in one exclusive section.
    ///
    /// Returns only the connections that were still members, so concurrent
    /// prunes of the same id report it once.
    pub fn unregister_all(&self, ids: &[ConnectionId]) -> Vec<Connection> {
        if ids.is_empty() {
            return Vec::new();
        }
        let mut connections = self.connections.write();
        ids.iter().filter_map(|id| connections.remove(id)).collect()
    }

    /// Visit every member under the shared lock.
    ///
    /// `f` must not call back into the registry's mutating methods.
    pub fn for_each(&self, mut f: impl FnMut(&Connection)) {
        let connections = self.connections.read();
        connections.values().for_each(|c| f(c));
    }

    pub fn contains(&self, id: ConnectionId) -> bool {
        self.connections.read().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.connections.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.read().is_empty()
    }
}

/// Keeps a connection registered for the guard's lifetime.
///
/// Whatever path ends a session, dropping the guard unregisters exactly once.
#[derive(Debug)]
pub struct RegistrationGuard {
    registry: Arc<ConnectionRegistry>,
    id: ConnectionId,
}

impl RegistrationGuard {
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl Drop for RegistrationGuard {
    fn drop(&mut self) {
        if self.registry.unregister(self.id).is_some() {
            tracing::debug!(connection_id = %self.id, "connection unregistered");
        }
    }
}
