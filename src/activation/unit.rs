use serde::{Serialize, Deserialize};

/// Logistic curve with base 2: `1 / (1 + 2^-x)`.
///
/// Flatter than the natural-base logistic by a factor of `ln 2`. The exact
/// derivative is `ln2 · f(x)(1 - f(x))`; the training step uses
/// `f(x)(1 - f(x))`, so the `ln 2` is folded into the learning rate.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp2())
}

/// A stateful scalar neuron. Remembers the last value fed into it and the
/// value it produced, so the backward pass can read them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivationUnit {
    pub last_input: f64,
    pub last_output: f64,
}

impl ActivationUnit {
    pub fn new() -> ActivationUnit {
        ActivationUnit::default()
    }

    pub fn activate(&mut self, x: f64) -> f64 {
        self.last_input = x;
        self.last_output = sigmoid(x);
        self.last_output
    }

    /// Stores `x` unchanged. Bias units are pinned with `passthrough(1.0)`.
    pub fn passthrough(&mut self, x: f64) -> f64 {
        self.last_input = x;
        self.last_output = x;
        x
    }

    /// `f(x)(1 - f(x))` evaluated at the stored output.
    pub fn slope(&self) -> f64 {
        self.last_output * (1.0 - self.last_output)
    }
}
