use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::activation::unit::ActivationUnit;
use crate::math::matrix::Matrix;
use crate::network::error::{LayerKind, NetworkError};
use crate::train::episode::Episodes;

/// A three-layer sigmoid network with a bias unit on the input and hidden
/// layers.
///
/// Weight shapes are fixed at construction:
/// - `weights_ih`: `(input_dim + 1) × hidden_dim`
/// - `weights_ho`: `(hidden_dim + 1) × output_dim`
///
/// The bias units sit at the last index of their layer and never receive
/// weighted input, which is why neither matrix has a column for them.
#[derive(Debug, Clone)]
pub struct Network {
    input_dim: usize,
    hidden_dim: usize,
    output_dim: usize,
    pub(crate) input_units: Vec<ActivationUnit>,
    pub(crate) hidden_units: Vec<ActivationUnit>,
    pub(crate) output_units: Vec<ActivationUnit>,
    pub(crate) weights_ih: Matrix,
    pub(crate) weights_ho: Matrix,
    pub(crate) episodes: Episodes,
}

impl Network {
    /// Builds a network whose weights are drawn from the thread-local RNG.
    pub fn new(input_dim: usize, hidden_dim: usize, output_dim: usize) -> Result<Network, NetworkError> {
        Network::with_rng(input_dim, hidden_dim, output_dim, &mut rand::thread_rng())
    }

    /// Builds a network with reproducible weights.
    pub fn seeded(
        input_dim: usize,
        hidden_dim: usize,
        output_dim: usize,
        seed: u64,
    ) -> Result<Network, NetworkError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Network::with_rng(input_dim, hidden_dim, output_dim, &mut rng)
    }

    pub fn with_rng<R: Rng>(
        input_dim: usize,
        hidden_dim: usize,
        output_dim: usize,
        rng: &mut R,
    ) -> Result<Network, NetworkError> {
        for (layer, dim) in [("input", input_dim), ("hidden", hidden_dim), ("output", output_dim)] {
            if dim == 0 {
                return Err(NetworkError::EmptyLayer { layer });
            }
        }

        let weights_ih = Matrix::uniform(input_dim + 1, hidden_dim, rng);
        let weights_ho = Matrix::uniform(hidden_dim + 1, output_dim, rng);
        debug!("built network {input_dim}-{hidden_dim}-{output_dim}");

        Ok(Network {
            input_dim,
            hidden_dim,
            output_dim,
            input_units: vec![ActivationUnit::new(); input_dim + 1],
            hidden_units: vec![ActivationUnit::new(); hidden_dim + 1],
            output_units: vec![ActivationUnit::new(); output_dim],
            weights_ih,
            weights_ho,
            episodes: Episodes::default(),
        })
    }

    pub fn with_episodes(mut self, episodes: Episodes) -> Network {
        self.episodes = episodes;
        self
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    pub fn hidden_dim(&self) -> usize {
        self.hidden_dim
    }

    pub fn output_dim(&self) -> usize {
        self.output_dim
    }

    pub fn weights_ih(&self) -> &Matrix {
        &self.weights_ih
    }

    pub fn weights_ho(&self) -> &Matrix {
        &self.weights_ho
    }

    /// Input units, bias last.
    pub fn input_units(&self) -> &[ActivationUnit] {
        &self.input_units
    }

    /// Hidden units, bias last.
    pub fn hidden_units(&self) -> &[ActivationUnit] {
        &self.hidden_units
    }

    pub fn output_units(&self) -> &[ActivationUnit] {
        &self.output_units
    }

    /// Forward pass. Overwrites the state of every unit, which the next
    /// `train` call reads as the basis for its gradient.
    pub fn infer(&mut self, input: &[f64]) -> Result<Vec<f64>, NetworkError> {
        self.check_input(input)?;

        for (unit, &x) in self.input_units.iter_mut().zip(input) {
            unit.activate(x);
        }
        self.input_units[self.input_dim].passthrough(1.0);

        feed(&self.input_units, &self.weights_ih, &mut self.hidden_units[..self.hidden_dim]);
        self.hidden_units[self.hidden_dim].passthrough(1.0);

        feed(&self.hidden_units, &self.weights_ho, &mut self.output_units);

        Ok(self.output_units.iter().map(|unit| unit.last_output).collect())
    }

    pub(crate) fn check_input(&self, input: &[f64]) -> Result<(), NetworkError> {
        if input.len() != self.input_dim {
            return Err(NetworkError::DimensionMismatch {
                layer: LayerKind::Input,
                actual: input.len(),
                expected: self.input_dim,
            });
        }
        Ok(())
    }

    pub(crate) fn check_target(&self, target: &[f64]) -> Result<(), NetworkError> {
        if target.len() != self.output_dim {
            return Err(NetworkError::DimensionMismatch {
                layer: LayerKind::Output,
                actual: target.len(),
                expected: self.output_dim,
            });
        }
        Ok(())
    }
}

/// Activates each unit of `next` on the weighted sum of every unit of
/// `prev` (bias included), reading column `n` of `weights` for unit `n`.
fn feed(prev: &[ActivationUnit], weights: &Matrix, next: &mut [ActivationUnit]) {
    for (n, unit) in next.iter_mut().enumerate() {
        let sum: f64 = prev.iter()
            .zip(&weights.data)
            .map(|(p, row)| p.last_output * row[n])
            .sum();
        unit.activate(sum);
    }
}
