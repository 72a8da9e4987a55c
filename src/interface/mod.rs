pub mod local_clipboard_trait;
pub mod status_sink_trait;

pub use local_clipboard_trait::LocalClipboardTrait;
pub use status_sink_trait::{ConnectionStatus, StatusSink};
