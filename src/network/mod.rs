pub mod error;
pub mod network;

pub use error::{LayerKind, NetworkError};
pub use network::Network;
