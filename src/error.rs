//! Unified error type system for clipsync.
//!
//! Every failure mode in the sync core has a defined "log and continue" or
//! "log and evict" resolution; nothing here is allowed to crash the hosting
//! process. The variants mirror that taxonomy: transport failures are
//! isolated to one connection, parse failures degrade to the plain-text
//! fallback, clipboard backend failures skip a single tick or write.

use std::fmt;

/// Unified application error type.
///
/// Organized by failure domain (Transport, Parse, Clipboard, Config, ...).
#[derive(Debug, Clone)]
pub enum SyncError {
    /// Send/receive failure on one peer connection
    Transport(String),

    /// Malformed message envelope
    Parse(String),

    /// Local clipboard backend errors (reading, writing)
    Clipboard(String),

    /// Configuration errors (loading, parsing, validation)
    Config(String),

    /// I/O errors (file read/write, permissions)
    Io(String),

    /// Generic/internal errors that don't fit other categories
    Internal(String),
}

impl SyncError {
    /// Create a transport error with a message.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a parse error with a message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a clipboard error with a message.
    pub fn clipboard(msg: impl Into<String>) -> Self {
        Self::Clipboard(msg.into())
    }

    /// Create a config error with a message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an I/O error with a message.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Create an internal error with a message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the error message as a string slice.
    pub fn message(&self) -> &str {
        match self {
            SyncError::Transport(msg) => msg,
            SyncError::Parse(msg) => msg,
            SyncError::Clipboard(msg) => msg,
            SyncError::Config(msg) => msg,
            SyncError::Io(msg) => msg,
            SyncError::Internal(msg) => msg,
        }
    }
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Transport(msg) => write!(f, "Transport error: {}", msg),
            SyncError::Parse(msg) => write!(f, "Parse error: {}", msg),
            SyncError::Clipboard(msg) => write!(f, "Clipboard error: {}", msg),
            SyncError::Config(msg) => write!(f, "Config error: {}", msg),
            SyncError::Io(msg) => write!(f, "I/O error: {}", msg),
            SyncError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for SyncError {}

impl From<anyhow::Error> for SyncError {
    fn from(err: anyhow::Error) -> Self {
        SyncError::Internal(err.to_string())
    }
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::io(err.to_string())
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::parse(format!("JSON error: {}", err))
    }
}

/// Type alias for Result with SyncError.
pub type Result<T> = std::result::Result<T, SyncError>;
