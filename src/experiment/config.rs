use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::corpus::parser::CorpusError;
use crate::features::grid::FeatureError;
use crate::network::error::NetworkError;
use crate::train::episode::Episodes;

#[derive(Debug, thiserror::Error)]
pub enum ExperimentError {
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error(transparent)]
    Feature(#[from] FeatureError),
    #[error(transparent)]
    Corpus(#[from] CorpusError),
    #[error("invalid experiment config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("failed to read experiment config: {0}")]
    Io(#[from] std::io::Error),
}

/// Hyperparameters for a sweep over hidden-layer sizes.
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// One network is trained and scored per entry.
    pub hidden_sizes: Vec<usize>,
    /// Full passes over the training set per network.
    pub epochs: usize,
    pub learning_rate: f64,
    /// Per-output error under which a training call skips its update.
    pub tolerance: f64,
    /// Number of output units; labels must be below this.
    pub classes: usize,
    /// Pixels per grid row in the corpus files.
    pub row_width: usize,
    /// Grids are cut into `regions × regions` blocks, one feature each.
    pub regions: usize,
    /// Seeds weight initialisation. `None` draws from the thread RNG.
    pub seed: Option<u64>,
    pub episodes: Episodes,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            hidden_sizes: vec![10, 20, 30, 40, 50],
            epochs: 500,
            learning_rate: 0.01,
            tolerance: 0.0,
            classes: 10,
            row_width: 28,
            regions: 5,
            seed: None,
            episodes: Episodes::Parallel,
        }
    }
}

impl ExperimentConfig {
    /// Length of the feature vectors fed to the network.
    pub fn input_dim(&self) -> usize {
        self.regions * self.regions
    }

    /// Deserializes a config from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<ExperimentConfig, ExperimentError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
