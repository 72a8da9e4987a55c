//! Clipboard broadcast engine.
//!
//! Single entry point for clipboard changes from any origin: decides
//! whether a value is genuinely new, mirrors it to the local clipboard
//! backend, and fans it out to every other registered peer.

use std::sync::Arc;

use log::{debug, error, info};
use tokio::sync::RwLock;
use warp::ws::Message;

use crate::infrastructure::connection::{ConnectionRegistry, DeviceId, PeerHandle};
use crate::interface::LocalClipboardTrait;
use crate::message::{ClipboardMessage, LOCAL_SOURCE};

/// Where a clipboard value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BroadcastOrigin {
    /// The local clipboard poller. Not a registered connection, so the
    /// fan-out excludes nobody.
    Local,
    /// A connected peer device; excluded from its own fan-out.
    Peer(DeviceId),
}

impl BroadcastOrigin {
    /// The `source` label stamped on outbound updates.
    pub fn label(&self) -> &str {
        match self {
            BroadcastOrigin::Local => LOCAL_SOURCE,
            BroadcastOrigin::Peer(device_id) => device_id,
        }
    }

    fn exclude(&self) -> Option<&str> {
        match self {
            BroadcastOrigin::Local => None,
            BroadcastOrigin::Peer(device_id) => Some(device_id),
        }
    }
}

pub struct ClipboardBroadcaster {
    registry: ConnectionRegistry,
    clipboard: Arc<dyn LocalClipboardTrait>,
    /// Last accepted clipboard value; the duplicate gate. Mutated only
    /// here, under the write lock, so the check-then-set is atomic with
    /// respect to concurrent sessions and the poller.
    last_value: Arc<RwLock<String>>,
}

impl ClipboardBroadcaster {
    pub fn new(registry: ConnectionRegistry, clipboard: Arc<dyn LocalClipboardTrait>) -> Self {
        Self {
            registry,
            clipboard,
            last_value: Arc::new(RwLock::new(String::new())),
        }
    }

    pub async fn last_value(&self) -> String {
        self.last_value.read().await.clone()
    }

    /// Apply a clipboard value and fan it out to every peer except the
    /// origin. Returns whether the value was accepted as new; duplicates
    /// and empty values are dropped without a broadcast.
    ///
    /// Per-peer send failures are terminal for that one peer: it is
    /// evicted from the registry and delivery continues to the rest.
    pub async fn apply_and_broadcast(&self, text: &str, origin: &BroadcastOrigin) -> bool {
        if text.is_empty() {
            return false;
        }

        {
            let mut last_value = self.last_value.write().await;
            if *last_value == text {
                debug!("Skipping duplicate clipboard content");
                return false;
            }

            if let BroadcastOrigin::Peer(device_id) = origin {
                // Local-origin values were just read from the backend and
                // need no write-back.
                if let Err(e) = self.clipboard.write_text(text).await {
                    error!("Failed to write local clipboard: {}", e);
                }
                info!("Received clipboard update from {}", device_id);
            }

            *last_value = text.to_string();
        }

        self.fan_out(text, origin).await;
        true
    }

    async fn fan_out(&self, text: &str, origin: &BroadcastOrigin) {
        let message = match ClipboardMessage::clipboard_update(text, origin.label()).to_ws_message()
        {
            Ok(message) => message,
            Err(e) => {
                error!("Failed to encode clipboard update: {}", e);
                return;
            }
        };
        let targets = self.registry.snapshot_except(origin.exclude()).await;
        self.send_to_targets(message, targets).await;
    }

    async fn send_to_targets(&self, message: Message, targets: Vec<PeerHandle>) {
        for peer in targets {
            match peer.send(message.clone()) {
                Ok(()) => debug!("Sent clipboard update to {}", peer.device_id()),
                Err(e) => {
                    error!("Error broadcasting to {}: {}", peer.device_id(), e);
                    peer.close();
                    // Identity-checked removal: the snapshot may hold a
                    // handle that a reconnect has since replaced, and the
                    // failed send must not evict the replacement.
                    self.registry
                        .unregister_handle(peer.device_id(), &peer)
                        .await;
                }
            }
        }
    }
}
