use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use log::{debug, info, warn};
use tokio::sync::RwLock;

use super::peer::{DeviceId, PeerHandle};

/// Registry of live peer connections, keyed by device id.
///
/// At most one live connection per device id: registering a second
/// connection under an existing id closes and evicts the prior one.
/// Broadcast enumeration works on a cloned snapshot so sends never hold
/// the map lock; mutations racing with a broadcast may skip or include a
/// peer on the boundary, which is acceptable for this best-effort system.
#[derive(Clone, Default)]
pub struct ConnectionRegistry {
    connections: Arc<RwLock<HashMap<DeviceId, PeerHandle>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a connection, closing and evicting any prior connection
    /// registered under the same device id.
    pub async fn register(&self, handle: PeerHandle) {
        let device_id = handle.device_id().to_string();
        let prev = {
            let mut connections = self.connections.write().await;
            connections.insert(device_id.clone(), handle)
        };
        if let Some(prev) = prev {
            warn!(
                "Device {} already connected. Closing previous connection.",
                device_id
            );
            prev.close();
        }
    }

    /// Remove the connection for `device_id` if present. Calling this for
    /// an absent id is a no-op: both the session cleanup path and the
    /// broadcast failure path may race to evict the same peer.
    pub async fn unregister(&self, device_id: &str) {
        if self.connections.write().await.remove(device_id).is_some() {
            debug!("Unregistered device {}", device_id);
        }
    }

    /// Remove the registration for `device_id` only if it still refers to
    /// `handle`'s connection. A session that was replaced via
    /// [`register`](Self::register) must not evict its replacement during
    /// its own teardown.
    pub async fn unregister_handle(&self, device_id: &str, handle: &PeerHandle) {
        let mut connections = self.connections.write().await;
        if let Some(current) = connections.get(device_id) {
            if current.same_connection(handle) {
                connections.remove(device_id);
                debug!("Unregistered device {}", device_id);
            }
        }
    }

    pub async fn get(&self, device_id: &str) -> Option<PeerHandle> {
        self.connections.read().await.get(device_id).cloned()
    }

    pub async fn count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Clone every registered handle except the one for `exclude`.
    /// `None` excludes nothing (local-origin broadcasts).
    pub async fn snapshot_except(&self, exclude: Option<&str>) -> Vec<PeerHandle> {
        let connections = self.connections.read().await;
        connections
            .iter()
            .filter(|(device_id, _)| exclude != Some(device_id.as_str()))
            .map(|(_, handle)| handle.clone())
            .collect()
    }

    /// Close every connection and empty the registry.
    pub async fn close_all(&self) {
        info!("Disconnecting all peers");
        let connections = {
            let mut connections = self.connections.write().await;
            std::mem::take(&mut *connections)
        };

        let close_futures = connections.into_iter().map(|(device_id, handle)| async move {
            handle.close();
            // Give the session's forwarding task a moment to flush the
            // close frame before the process goes away.
            tokio::time::sleep(Duration::from_millis(100)).await;
            debug!("Closed connection to {}", device_id);
        });
        join_all(close_futures).await;
    }
}
