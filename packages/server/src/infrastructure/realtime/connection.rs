//! A single upgraded WebSocket session as seen by the fan-out side.

use std::{fmt, sync::Arc};

use thiserror::Error;
use tokio::sync::{Notify, mpsc};
use uuid::Uuid;

/// Frames are serialized once per broadcast and shared between recipients.
pub type Frame = Arc<str>;

/// Identity of one transport session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SendError {
    /// The client is not draining its queue fast enough.
    #[error("outbound queue full")]
    Full,

    /// The writer task has exited.
    #[error("connection closed")]
    Closed,
}

/// Sending half of a connection: a bounded outbound queue plus a close signal.
///
/// Cloning is cheap; every clone refers to the same session.
#[derive(Debug, Clone)]
pub struct Connection {
    id: ConnectionId,
    tx: mpsc::Sender<Frame>,
    close: Arc<Notify>,
}

/// Receiving half, owned by the session's writer task.
#[derive(Debug)]
pub struct Outbound {
    rx: mpsc::Receiver<Frame>,
    close: Arc<Notify>,
}

impl Connection {
    /// Create a connection whose outbound queue holds at most `capacity` frames.
    pub fn open(capacity: usize) -> (Self, Outbound) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let close = Arc::new(Notify::new());
        let connection = Self {
            id: ConnectionId::generate(),
            tx,
            close: Arc::clone(&close),
        };
        (connection, Outbound { rx, close })
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Enqueue a frame without waiting.
    pub fn try_send(&self, frame: Frame) -> Result<(), SendError> {
        self.tx.try_send(frame).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => SendError::Full,
            mpsc::error::TrySendError::Closed(_) => SendError::Closed,
        })
    }

    /// Ask the writer task to close the transport.
    ///
    /// The signal is latched, so it is seen even if the writer is busy.
    pub fn close(&self) {
        self.close.notify_one();
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl Outbound {
    /// Next frame to write, or `None` once the connection was closed.
    ///
    /// A close request takes priority over frames still queued.
    pub async fn next(&mut self) -> Option<Frame> {
        tokio::select! {
            biased;
            _ = self.close.notified() => None,
            frame = self.rx.recv() => frame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_and_receive() {
        // テスト項目: キューに入れたフレームを writer 側で受け取れる
        // given (前提条件):
        let (conn, mut outbound) = Connection::open(4);

        // when (操作):
        conn.try_send(Arc::from("hello")).unwrap();

        // then (期待する結果):
        assert_eq!(outbound.next().await.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_full_queue() {
        // テスト項目: キューが満杯の場合は Full が返る
        // given (前提条件):
        let (conn, _outbound) = Connection::open(1);
        conn.try_send(Arc::from("first")).unwrap();

        // when (操作):
        let result = conn.try_send(Arc::from("second"));

        // then (期待する結果):
        assert_eq!(result, Err(SendError::Full));
    }

    #[tokio::test]
    async fn test_dropped_writer_is_closed() {
        // テスト項目: writer 側が破棄されると Closed が返る
        // given (前提条件):
        let (conn, outbound) = Connection::open(4);

        // when (操作):
        drop(outbound);

        // then (期待する結果):
        assert!(conn.is_closed());
        assert_eq!(conn.try_send(Arc::from("x")), Err(SendError::Closed));
    }

    #[tokio::test]
    async fn test_close_preempts_queued_frames() {
        // テスト項目: close 要求はキュー内のフレームより優先される
        // given (前提条件):
        let (conn, mut outbound) = Connection::open(4);
        conn.try_send(Arc::from("queued")).unwrap();

        // when (操作):
        conn.clone().close();

        // then (期待する結果):
        assert_eq!(outbound.next().await, None);
    }

    #[test]
    fn test_ids_are_unique() {
        let (a, _ra) = Connection::open(1);
        let (b, _rb) = Connection::open(1);
        assert_ne!(a.id(), b.id());
    }
}
