use std::sync::Mutex;

use async_trait::async_trait;
use clipboard_rs::{Clipboard, ClipboardContext};

use crate::error::{Result, SyncError};
use crate::interface::LocalClipboardTrait;

/// System clipboard backend over clipboard-rs.
///
/// The context is not thread-safe; a blocking mutex serializes access.
/// Reads and writes are quick enough that holding it across the call is
/// acceptable on the async runtime.
pub struct SystemClipboard {
    context: Mutex<ClipboardContext>,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let context =
            ClipboardContext::new().map_err(|e| SyncError::clipboard(e.to_string()))?;
        Ok(Self {
            context: Mutex::new(context),
        })
    }
}

#[async_trait]
impl LocalClipboardTrait for SystemClipboard {
    async fn read_text(&self) -> Result<String> {
        let context = self
            .context
            .lock()
            .map_err(|_| SyncError::clipboard("clipboard context poisoned"))?;
        // An empty or non-text clipboard reads as empty, not as an error;
        // the poller treats empty as "nothing to sync".
        match context.get_text() {
            Ok(text) => Ok(text),
            Err(e) => Err(SyncError::clipboard(e.to_string())),
        }
    }

    async fn write_text(&self, text: &str) -> Result<()> {
        let context = self
            .context
            .lock()
            .map_err(|_| SyncError::clipboard("clipboard context poisoned"))?;
        context
            .set_text(text.to_string())
            .map_err(|e| SyncError::clipboard(e.to_string()))
    }
}
