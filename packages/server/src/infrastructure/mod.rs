//! Infrastructure layer: wire DTOs, repository implementations and the
//! WebSocket fan-out machinery.

pub mod dto;
pub mod realtime;
pub mod repository;
