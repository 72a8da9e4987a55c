//! Test doubles shared by the integration suites.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use clipsync::error::{Result, SyncError};
use clipsync::interface::{ConnectionStatus, LocalClipboardTrait, StatusSink};

/// In-memory clipboard backend. `fail_reads(n)` makes the next `n` reads
/// error, for exercising the poller's log-and-continue path.
#[derive(Default)]
pub struct MemoryClipboard {
    content: Mutex<String>,
    failing_reads: AtomicU32,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_content(&self, text: &str) {
        *self.content.lock().unwrap() = text.to_string();
    }

    pub fn content(&self) -> String {
        self.content.lock().unwrap().clone()
    }

    pub fn fail_reads(&self, count: u32) {
        self.failing_reads.store(count, Ordering::SeqCst);
    }
}

#[async_trait]
impl LocalClipboardTrait for MemoryClipboard {
    async fn read_text(&self) -> Result<String> {
        let remaining = self.failing_reads.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failing_reads.store(remaining - 1, Ordering::SeqCst);
            return Err(SyncError::clipboard("simulated read failure"));
        }
        Ok(self.content())
    }

    async fn write_text(&self, text: &str) -> Result<()> {
        self.set_content(text);
        Ok(())
    }
}

/// Status sink that records every notification.
#[derive(Default)]
pub struct RecordingStatusSink {
    events: Mutex<Vec<(String, ConnectionStatus)>>,
}

impl RecordingStatusSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(String, ConnectionStatus)> {
        self.events.lock().unwrap().clone()
    }

    pub fn contains(&self, device_prefix: &str, status: ConnectionStatus) -> bool {
        self.events()
            .iter()
            .any(|(prefix, s)| prefix == device_prefix && *s == status)
    }
}

impl StatusSink for RecordingStatusSink {
    fn notify(&self, device_prefix: &str, status: ConnectionStatus) {
        self.events
            .lock()
            .unwrap()
            .push((device_prefix.to_string(), status));
    }
}
