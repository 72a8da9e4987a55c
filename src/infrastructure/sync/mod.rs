pub mod broadcaster;
pub mod poller;

pub use broadcaster::{BroadcastOrigin, ClipboardBroadcaster};
pub use poller::ClipboardPoller;
