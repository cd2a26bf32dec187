//! The two weight-update episodes of a training step.
//!
//! Each episode fans out over an index partition in which every task owns the
//! slots it writes, then joins before returning. Because no slot is written
//! twice and every read comes from state the episode does not mutate, the
//! parallel and sequential modes produce bit-identical weights.

use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::activation::unit::ActivationUnit;
use crate::math::matrix::Matrix;

/// How a training step executes its update episodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Episodes {
    /// Fan out on the rayon thread pool, joining after each episode.
    #[default]
    Parallel,
    /// Run every task in index order on the calling thread.
    Sequential,
}

fn nudge(learning_rate: f64, delta: f64, signal: f64) -> f64 {
    learning_rate * delta * signal
}

/// Updates column `k` of one hidden→output row, saving the old weight first.
fn output_task(row: &mut [f64], prev: &mut [f64], unit: &ActivationUnit, k: usize, learning_rate: f64, delta: f64) {
    prev[k] = row[k];
    row[k] += nudge(learning_rate, delta, unit.last_output);
}

/// Error signal of hidden unit `j`, back-propagated through the pre-update
/// weights in `prev` (row `j` of the snapshot).
fn hidden_delta(prev: &[f64], unit: &ActivationUnit, delta_o: &[f64]) -> f64 {
    let back: f64 = delta_o.iter().zip(prev).map(|(d, w)| d * w).sum();
    back * unit.slope()
}

/// Output-weight episode.
///
/// For each output index `k` in turn, one task per hidden row `j` (bias row
/// included) records `weights[j][k]` in `snapshot[j][k]` and then applies
/// its update. All tasks for `k` finish before `k + 1` starts.
pub(crate) fn update_output_weights(
    episodes: Episodes,
    weights: &mut Matrix,
    snapshot: &mut Matrix,
    hidden: &[ActivationUnit],
    delta_o: &[f64],
    learning_rate: f64,
) {
    for (k, &delta) in delta_o.iter().enumerate() {
        match episodes {
            Episodes::Parallel => weights.data
                .par_iter_mut()
                .zip(snapshot.data.par_iter_mut())
                .zip(hidden.par_iter())
                .for_each(|((row, prev), unit)| output_task(row, prev, unit, k, learning_rate, delta)),
            Episodes::Sequential => weights.data
                .iter_mut()
                .zip(snapshot.data.iter_mut())
                .zip(hidden.iter())
                .for_each(|((row, prev), unit)| output_task(row, prev, unit, k, learning_rate, delta)),
        }
    }
}

/// Hidden-weight episode.
///
/// `hidden` holds the non-bias hidden units only; the bias unit has no
/// incoming weights. `snapshot` must hold the hidden→output weights as they
/// were before `update_output_weights` ran.
pub(crate) fn update_hidden_weights(
    episodes: Episodes,
    weights: &mut Matrix,
    snapshot: &Matrix,
    inputs: &[ActivationUnit],
    hidden: &[ActivationUnit],
    delta_o: &[f64],
    learning_rate: f64,
) {
    match episodes {
        Episodes::Parallel => {
            // Rows of `weights` are input units, so column `j` is spread over
            // every row. Deltas are computed per `j` first, then each task
            // owns one input row and writes every `j` in it.
            let delta_h: Vec<f64> = snapshot.data
                .par_iter()
                .zip(hidden.par_iter())
                .map(|(prev, unit)| hidden_delta(prev, unit, delta_o))
                .collect();

            weights.data
                .par_iter_mut()
                .zip(inputs.par_iter())
                .for_each(|(row, input)| {
                    for (w, &delta) in row.iter_mut().zip(&delta_h) {
                        *w += nudge(learning_rate, delta, input.last_output);
                    }
                });
        }
        Episodes::Sequential => {
            for (j, unit) in hidden.iter().enumerate() {
                let delta = hidden_delta(&snapshot.data[j], unit, delta_o);
                for (row, input) in weights.data.iter_mut().zip(inputs) {
                    row[j] += nudge(learning_rate, delta, input.last_output);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(outputs: &[f64]) -> Vec<ActivationUnit> {
        outputs.iter()
            .map(|&o| ActivationUnit { last_input: 0.0, last_output: o })
            .collect()
    }

    #[test]
    fn output_episode_snapshots_before_writing() {
        let initial = Matrix::from_data(vec![vec![0.1, -0.2], vec![0.3, 0.4], vec![-0.5, 0.0]]);
        let hidden = units(&[0.25, 0.75, 1.0]);
        let delta_o = [0.5, -1.0];

        for episodes in [Episodes::Parallel, Episodes::Sequential] {
            let mut weights = initial.clone();
            let mut snapshot = Matrix::zeros(3, 2);
            update_output_weights(episodes, &mut weights, &mut snapshot, &hidden, &delta_o, 0.1);

            assert_eq!(snapshot, initial);
            for j in 0..3 {
                for k in 0..2 {
                    let expected = initial.get(j, k) + 0.1 * delta_o[k] * hidden[j].last_output;
                    assert_eq!(weights.get(j, k), expected);
                }
            }
        }
    }

    #[test]
    fn hidden_episode_uses_snapshot_and_skips_nothing() {
        let snapshot = Matrix::from_data(vec![vec![0.2], vec![-0.4], vec![0.9]]);
        let initial = Matrix::from_data(vec![vec![0.0, 0.1], vec![0.5, -0.5]]);
        let inputs = units(&[0.6, 1.0]);
        let hidden = units(&[0.5, 0.8]);
        let delta_o = [0.3];

        let mut parallel = initial.clone();
        update_hidden_weights(Episodes::Parallel, &mut parallel, &snapshot, &inputs, &hidden, &delta_o, 0.7);
        let mut sequential = initial.clone();
        update_hidden_weights(Episodes::Sequential, &mut sequential, &snapshot, &inputs, &hidden, &delta_o, 0.7);

        assert_eq!(parallel, sequential);

        let delta_h = [0.3 * 0.2 * 0.5 * 0.5, 0.3 * -0.4 * 0.8 * 0.2];
        for i in 0..2 {
            for j in 0..2 {
                let expected = initial.get(i, j) + 0.7 * delta_h[j] * inputs[i].last_output;
                assert!((parallel.get(i, j) - expected).abs() < 1e-15);
            }
        }
    }

    #[test]
    fn episodes_serialize_as_snake_case() {
        assert_eq!(serde_json::to_string(&Episodes::Sequential).unwrap(), "\"sequential\"");
        assert_eq!(serde_json::from_str::<Episodes>("\"parallel\"").unwrap(), Episodes::Parallel);
    }
}
