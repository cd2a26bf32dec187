/// Squared-error score for a network output against its target vector.
/// Reported as the per-epoch training loss and as the sweep's test MSE.
pub struct MseLoss;

impl MseLoss {
    /// Mean over outputs of `(predicted - expected)²`; 0 means an exact match.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>() / n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_squared_differences() {
        assert_eq!(MseLoss::loss(&[1.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(MseLoss::loss(&[0.5, 0.0, 1.0], &[0.0, 0.5, 1.0]), 0.5 / 3.0);
    }
}
