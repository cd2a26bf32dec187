use log::trace;

use crate::math::matrix::Matrix;
use crate::network::error::NetworkError;
use crate::network::network::Network;
use crate::train::episode::{update_hidden_weights, update_output_weights};

impl Network {
    /// One step of online backpropagation towards `target`.
    ///
    /// Runs a forward pass on `input`, then, unless every output is already
    /// within `tolerance` of its target, updates both weight matrices. Both
    /// vectors are length-checked before anything is mutated.
    ///
    /// After the call the output units still hold the outputs this step
    /// trained against.
    pub fn train(
        &mut self,
        input: &[f64],
        target: &[f64],
        learning_rate: f64,
        tolerance: f64,
    ) -> Result<(), NetworkError> {
        self.check_input(input)?;
        self.check_target(target)?;

        let output = self.infer(input)?;
        if within_tolerance(&output, target, tolerance) {
            trace!("outputs within {tolerance} of target, skipping update");
            return Ok(());
        }

        let delta_o: Vec<f64> = output.iter()
            .zip(target)
            .map(|(&o, &t)| (t - o) * o * (1.0 - o))
            .collect();

        let hidden_dim = self.hidden_dim();
        let mut snapshot = Matrix::zeros(hidden_dim + 1, self.output_dim());

        update_output_weights(
            self.episodes,
            &mut self.weights_ho,
            &mut snapshot,
            &self.hidden_units,
            &delta_o,
            learning_rate,
        );
        update_hidden_weights(
            self.episodes,
            &mut self.weights_ih,
            &snapshot,
            &self.input_units,
            &self.hidden_units[..hidden_dim],
            &delta_o,
            learning_rate,
        );

        Ok(())
    }
}

pub(crate) fn within_tolerance(output: &[f64], target: &[f64], tolerance: f64) -> bool {
    output.iter().zip(target).all(|(o, t)| (t - o).abs() <= tolerance)
}
