pub mod peers;
pub mod resolver;

pub use peers::PeerSet;
pub use resolver::{PeerClient, RemoteChain};

use std::time::Duration;

/// Per-request timeout for peer chain fetches.
pub const DEFAULT_PEER_TIMEOUT: Duration = Duration::from_secs(5);
