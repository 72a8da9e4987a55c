//! ClipSync Library
//!
//! Keeps the desktop clipboard synchronized with paired peer devices over
//! persistent WebSocket connections: whichever side's clipboard changes,
//! every other connected side receives and adopts the new content.

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod interface;
pub mod message;
pub mod utils;

// Re-export common types
pub use config::Setting;
pub use error::{Result, SyncError};
pub use infrastructure::connection::{ConnectionRegistry, PeerHandle};
pub use infrastructure::sync::{BroadcastOrigin, ClipboardBroadcaster, ClipboardPoller};
pub use infrastructure::web::handlers::WebSocketHandler;
pub use message::{ClipboardMessage, UpdateAck};
