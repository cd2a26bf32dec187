use std::time::Instant;

use log::info;
use serde::{Serialize, Deserialize};

use crate::corpus::parser::{one_hot, Sample};
use crate::experiment::config::{ExperimentConfig, ExperimentError};
use crate::features::grid::region_avg;
use crate::loss::mse::MseLoss;
use crate::network::error::NetworkError;
use crate::network::network::Network;
use crate::train::epoch::{check_pairs, train_epoch};

/// Feature vectors and one-hot targets ready to feed a network.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub inputs: Vec<Vec<f64>>,
    pub targets: Vec<Vec<f64>>,
}

impl Dataset {
    /// Extracts `regions × regions` block densities from each grid and
    /// one-hot encodes each label.
    pub fn from_samples(samples: &[Sample], regions: usize, classes: usize) -> Result<Dataset, ExperimentError> {
        let mut data = Dataset::default();
        for sample in samples {
            data.inputs.push(region_avg(&sample.grid, regions)?);
            data.targets.push(one_hot(sample.label, classes)?);
        }
        Ok(data)
    }

    /// Fails with `MismatchedSet` if the fields were filled unevenly.
    pub fn check(&self) -> Result<(), NetworkError> {
        check_pairs(&self.inputs, &self.targets)
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

/// Outcome of training and scoring one hidden-layer size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    pub hidden: usize,
    /// Fraction of test samples whose strongest output is the labelled class.
    pub accuracy: f64,
    pub test_mse: f64,
    /// Mean training loss of the last epoch.
    pub train_loss: f64,
    pub elapsed_ms: u64,
}

/// Trains one network per `config.hidden_sizes` entry and scores it on `test`.
pub fn run_sweep(
    config: &ExperimentConfig,
    train: &Dataset,
    test: &Dataset,
) -> Result<Vec<SweepResult>, ExperimentError> {
    train.check()?;
    test.check()?;
    let mut results = Vec::with_capacity(config.hidden_sizes.len());

    for &hidden in &config.hidden_sizes {
        let t_start = Instant::now();
        let mut network = match config.seed {
            Some(seed) => Network::seeded(config.input_dim(), hidden, config.classes, seed)?,
            None => Network::new(config.input_dim(), hidden, config.classes)?,
        }
        .with_episodes(config.episodes);

        let mut train_loss = 0.0;
        for epoch in 1..=config.epochs {
            let stats = train_epoch(
                &mut network,
                &train.inputs,
                &train.targets,
                config.learning_rate,
                config.tolerance,
                epoch,
                config.epochs,
            )?;
            train_loss = stats.train_loss;
        }

        let (accuracy, test_mse) = evaluate(&mut network, test)?;
        let result = SweepResult {
            hidden,
            accuracy,
            test_mse,
            train_loss,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        info!(
            "hidden {}: accuracy {:.4}, test mse {:.6}, {} ms",
            result.hidden, result.accuracy, result.test_mse, result.elapsed_ms
        );
        results.push(result);
    }

    Ok(results)
}

/// Returns `(accuracy, mean MSE)` of `network` over `data`. Both are 0 for an
/// empty set.
pub fn evaluate(network: &mut Network, data: &Dataset) -> Result<(f64, f64), NetworkError> {
    data.check()?;
    if data.is_empty() {
        return Ok((0.0, 0.0));
    }

    let mut correct = 0;
    let mut total_loss = 0.0;
    for (input, target) in data.inputs.iter().zip(&data.targets) {
        let output = network.infer(input)?;
        if argmax(&output) == argmax(target) {
            correct += 1;
        }
        total_loss += MseLoss::loss(&output, target);
    }

    let n = data.len() as f64;
    Ok((correct as f64 / n, total_loss / n))
}

/// Index of the largest element; the first one wins a tie.
pub fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best, max), (i, &x)| if x > max { (i, x) } else { (best, max) })
        .0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::train::episode::Episodes;

    /// A vertical bar in the left or right half of a 5×5 grid.
    fn bar(col: usize, label: usize) -> Sample {
        let mut grid = vec![vec![0u8; 5]; 5];
        for row in grid.iter_mut() {
            row[col] = 1;
        }
        Sample { grid, label }
    }

    fn config() -> ExperimentConfig {
        ExperimentConfig {
            hidden_sizes: vec![3, 6],
            epochs: 2000,
            learning_rate: 2.0,
            classes: 2,
            seed: Some(17),
            episodes: Episodes::Sequential,
            ..ExperimentConfig::default()
        }
    }

    #[test]
    fn argmax_prefers_first_maximum() {
        assert_eq!(argmax(&[0.1, 0.9, 0.3]), 1);
        assert_eq!(argmax(&[0.5, 0.5, 0.2]), 0);
        assert_eq!(argmax(&[0.0, 0.0, 1.0]), 2);
        assert_eq!(argmax(&[]), 0);
    }

    #[test]
    fn dataset_extracts_features_and_targets() {
        let data = Dataset::from_samples(&[bar(0, 0), bar(4, 1)], 5, 2).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.inputs[0].len(), 25);
        assert_eq!(data.inputs[0][0], 1.0);
        assert_eq!(data.inputs[0][4], 0.0);
        assert_eq!(data.targets[1], vec![0.0, 1.0]);
    }

    #[test]
    fn dataset_rejects_labels_past_class_count() {
        let err = Dataset::from_samples(&[bar(0, 3)], 5, 2).unwrap_err();
        assert!(matches!(err, ExperimentError::Corpus(_)));
    }

    #[test]
    fn sweep_learns_separable_bars() {
        let samples = [bar(0, 0), bar(1, 0), bar(3, 1), bar(4, 1)];
        let data = Dataset::from_samples(&samples, 5, 2).unwrap();

        let results = run_sweep(&config(), &data, &data).unwrap();
        assert_eq!(results.iter().map(|r| r.hidden).collect::<Vec<_>>(), vec![3, 6]);
        for result in &results {
            assert_eq!(result.accuracy, 1.0);
            assert!(result.test_mse < 0.25);
        }
    }

    #[test]
    fn sweep_is_reproducible_with_seed() {
        let samples = [bar(0, 0), bar(4, 1)];
        let data = Dataset::from_samples(&samples, 5, 2).unwrap();
        let mut config = config();
        config.epochs = 20;

        let a = run_sweep(&config, &data, &data).unwrap();
        let b = run_sweep(&config, &data, &data).unwrap();
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.accuracy, y.accuracy);
            assert_eq!(x.test_mse, y.test_mse);
            assert_eq!(x.train_loss, y.train_loss);
        }
    }

    fn unpaired() -> Dataset {
        let mut data = Dataset::from_samples(&[bar(0, 0), bar(4, 1)], 5, 2).unwrap();
        data.targets.pop();
        data
    }

    #[test]
    fn sweep_rejects_unpaired_sets() {
        let good = Dataset::from_samples(&[bar(0, 0), bar(4, 1)], 5, 2).unwrap();
        let mismatched = NetworkError::MismatchedSet { inputs: 2, targets: 1 };

        let err = run_sweep(&config(), &unpaired(), &good).unwrap_err();
        assert!(matches!(err, ExperimentError::Network(e) if e == mismatched));

        let err = run_sweep(&config(), &good, &unpaired()).unwrap_err();
        assert!(matches!(err, ExperimentError::Network(e) if e == mismatched));
    }

    #[test]
    fn evaluate_rejects_unpaired_set() {
        let mut network = Network::seeded(25, 3, 2, 1).unwrap();
        assert_eq!(
            evaluate(&mut network, &unpaired()).unwrap_err(),
            NetworkError::MismatchedSet { inputs: 2, targets: 1 }
        );
    }

    #[test]
    fn evaluate_on_empty_set_is_zero() {
        let mut network = Network::seeded(25, 3, 2, 1).unwrap();
        assert_eq!(evaluate(&mut network, &Dataset::default()).unwrap(), (0.0, 0.0));
    }
}
