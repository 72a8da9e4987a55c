pub mod peer;
pub mod registry;

pub use peer::{DeviceId, PeerHandle};
pub use registry::ConnectionRegistry;
