pub mod config;
pub mod sweep;

pub use config::{ExperimentConfig, ExperimentError};
pub use sweep::{argmax, evaluate, run_sweep, Dataset, SweepResult};
