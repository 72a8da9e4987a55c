use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc;
use warp::ws::Message;

use crate::error::{Result, SyncError};

pub type DeviceId = String;

/// Handle to one connected peer.
///
/// The handle only carries the outbound message channel and a liveness
/// flag; the session task owns the underlying socket. Clones share both,
/// so closing any clone marks every holder's view of the peer as dead.
#[derive(Clone)]
pub struct PeerHandle {
    device_id: DeviceId,
    sender: mpsc::UnboundedSender<Message>,
    connected: Arc<AtomicBool>,
}

impl PeerHandle {
    pub fn new(device_id: DeviceId, sender: mpsc::UnboundedSender<Message>) -> Self {
        Self {
            device_id,
            sender,
            connected: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    /// Queue a frame for delivery. Fails when the peer has been closed or
    /// its session task has gone away; the failure marks the handle dead.
    pub fn send(&self, message: Message) -> Result<()> {
        if !self.is_connected() {
            return Err(SyncError::transport(format!(
                "connection to {} is closed",
                self.device_id
            )));
        }
        self.sender.send(message).map_err(|_| {
            self.connected.store(false, Ordering::Relaxed);
            SyncError::transport(format!("send channel to {} closed", self.device_id))
        })
    }

    pub fn send_json<T: Serialize>(&self, payload: &T) -> Result<()> {
        let json = serde_json::to_string(payload)?;
        self.send(Message::text(json))
    }

    /// Best-effort close: mark the handle dead and push a close frame so
    /// the peer's session loop winds down.
    pub fn close(&self) {
        self.connected.store(false, Ordering::Relaxed);
        let _ = self.sender.send(Message::close());
    }

    /// Whether two handles refer to the same underlying connection.
    pub fn same_connection(&self, other: &PeerHandle) -> bool {
        self.sender.same_channel(&other.sender)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_after_close_fails() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let handle = PeerHandle::new("d1".to_string(), tx);
        assert!(handle.is_connected());

        handle.close();
        assert!(!handle.is_connected());
        assert!(handle.send(Message::text("hi")).is_err());
    }

    #[test]
    fn test_send_with_dropped_receiver_fails_and_marks_dead() {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = PeerHandle::new("d1".to_string(), tx);
        drop(rx);

        assert!(handle.send(Message::text("hi")).is_err());
        assert!(!handle.is_connected());
    }

    #[test]
    fn test_same_connection() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let a = PeerHandle::new("d1".to_string(), tx);
        let b = a.clone();
        let (other_tx, _other_rx) = mpsc::unbounded_channel();
        let c = PeerHandle::new("d1".to_string(), other_tx);

        assert!(a.same_connection(&b));
        assert!(!a.same_connection(&c));
    }
}
