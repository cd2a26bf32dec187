use std::time::Instant;

use log::debug;
use serde::{Serialize, Deserialize};

use crate::loss::mse::MseLoss;
use crate::network::error::NetworkError;
use crate::network::network::Network;
use crate::train::backprop::within_tolerance;

/// Statistics for one pass of `train_epoch` over a training set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    pub total_epochs: usize,
    /// Mean MSE of the outputs each training call saw, before its update.
    pub train_loss: f64,
    /// Samples already within tolerance, i.e. skipped without an update.
    pub converged: usize,
    pub elapsed_ms: u64,
}

/// Fails with `MismatchedSet` unless every input has exactly one target.
pub(crate) fn check_pairs(inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<(), NetworkError> {
    if inputs.len() != targets.len() {
        return Err(NetworkError::MismatchedSet { inputs: inputs.len(), targets: targets.len() });
    }
    Ok(())
}

/// Calls `Network::train` once per sample, in the given order. A set whose
/// lengths differ is rejected before the network is touched.
pub fn train_epoch(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    learning_rate: f64,
    tolerance: f64,
    epoch: usize,
    total_epochs: usize,
) -> Result<EpochStats, NetworkError> {
    check_pairs(inputs, targets)?;

    let t_start = Instant::now();
    let mut total_loss = 0.0;
    let mut converged = 0;

    for (input, target) in inputs.iter().zip(targets) {
        network.train(input, target, learning_rate, tolerance)?;

        let seen: Vec<f64> = network.output_units().iter().map(|u| u.last_output).collect();
        total_loss += MseLoss::loss(&seen, target);
        if within_tolerance(&seen, target, tolerance) {
            converged += 1;
        }
    }

    let stats = EpochStats {
        epoch,
        total_epochs,
        train_loss: if inputs.is_empty() { 0.0 } else { total_loss / inputs.len() as f64 },
        converged,
        elapsed_ms: t_start.elapsed().as_millis() as u64,
    };
    debug!(
        "epoch {}/{}: loss {:.6}, {} converged, {} ms",
        stats.epoch, stats.total_epochs, stats.train_loss, stats.converged, stats.elapsed_ms
    );
    Ok(stats)
}
