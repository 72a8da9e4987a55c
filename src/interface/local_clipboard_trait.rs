use crate::error::Result;
use async_trait::async_trait;

/// Local clipboard backend capability.
///
/// The sync core only ever reads and writes plain text through this seam;
/// the real backend lives in `infrastructure::clipboard` and tests inject
/// an in-memory double.
#[async_trait]
pub trait LocalClipboardTrait: Send + Sync {
    /// Read the current clipboard text. An empty string means an empty
    /// (or non-text) clipboard, not an error.
    async fn read_text(&self) -> Result<String>;

    /// Replace the clipboard contents with `text`.
    async fn write_text(&self, text: &str) -> Result<()>;
}
