//! Local clipboard poller.
//!
//! Samples the local clipboard backend on a fixed interval and feeds
//! changes into the broadcast engine as local-origin updates. A failed
//! read skips the tick; the loop itself runs until aborted at shutdown.

use std::sync::Arc;
use std::time::Duration;

use log::{error, info};
use tokio::task::JoinHandle;
use tokio::time::interval;

use super::broadcaster::{BroadcastOrigin, ClipboardBroadcaster};
use crate::interface::LocalClipboardTrait;

pub struct ClipboardPoller {
    clipboard: Arc<dyn LocalClipboardTrait>,
    broadcaster: Arc<ClipboardBroadcaster>,
    poll_interval: Duration,
}

impl ClipboardPoller {
    pub fn new(
        clipboard: Arc<dyn LocalClipboardTrait>,
        broadcaster: Arc<ClipboardBroadcaster>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            clipboard,
            broadcaster,
            poll_interval,
        }
    }

    /// Spawn the polling loop. The returned handle is aborted at shutdown.
    pub fn start(self) -> JoinHandle<()> {
        info!(
            "Starting local clipboard monitoring (every {:?})",
            self.poll_interval
        );
        tokio::spawn(async move {
            let mut ticker = interval(self.poll_interval);
            loop {
                ticker.tick().await;
                match self.clipboard.read_text().await {
                    Ok(content) => {
                        if content.is_empty() {
                            continue;
                        }
                        // The duplicate gate lives in the broadcaster, so an
                        // unchanged clipboard costs one rejected call per tick.
                        self.broadcaster
                            .apply_and_broadcast(&content, &BroadcastOrigin::Local)
                            .await;
                    }
                    Err(e) => error!("Clipboard monitor error: {}", e),
                }
            }
        })
    }
}
