/// Connection lifecycle events surfaced to the hosting application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "Connected",
            ConnectionStatus::Disconnected => "Disconnected",
        }
    }
}

/// Observer for per-device connection status changes.
///
/// Fire-and-forget: implementations must not block the calling session
/// task. A GUI registers itself as one implementation; tests register a
/// recording one.
pub trait StatusSink: Send + Sync {
    /// `device_prefix` is a shortened device id suitable for display.
    fn notify(&self, device_prefix: &str, status: ConnectionStatus);
}
