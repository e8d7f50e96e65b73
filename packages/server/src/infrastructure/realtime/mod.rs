//! Realtime notification fan-out over WebSocket connections.
//!
//! - [`ConnectionRegistry`]: the set of open connections (reader/writer locked)
//! - [`Broadcaster`]: serializes one envelope and pushes it to every member,
//!   pruning connections that cannot take it

pub mod broadcaster;
pub mod connection;
pub mod registry;

pub use broadcaster::{BroadcastReport, Broadcaster};
pub use connection::{Connection, ConnectionId, Outbound, SendError};
pub use registry::{ConnectionRegistry, RegistrationGuard};
