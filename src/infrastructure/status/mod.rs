use log::info;

use crate::interface::{ConnectionStatus, StatusSink};

/// Default status sink: writes connection changes to the log. The GUI
/// host, when present, swaps in its own implementation.
pub struct LogStatusSink;

impl StatusSink for LogStatusSink {
    fn notify(&self, device_prefix: &str, status: ConnectionStatus) {
        info!("Status: {}... {}", device_prefix, status.as_str());
    }
}
