pub mod math;
pub mod activation;
pub mod network;
pub mod train;
pub mod loss;
pub mod features;
pub mod corpus;
pub mod experiment;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::unit::ActivationUnit;
pub use network::{LayerKind, Network, NetworkError};
pub use train::{train_epoch, EpochStats, Episodes};
pub use loss::mse::MseLoss;
pub use experiment::{run_sweep, Dataset, ExperimentConfig, SweepResult};
