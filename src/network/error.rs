use std::fmt;

/// Which caller-supplied vector failed the length check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Input,
    Output,
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerKind::Input => write!(f, "input"),
            LayerKind::Output => write!(f, "target"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// A vector's length differs from the layer it is matched against.
    /// Raised before any unit or weight is touched.
    #[error("{layer} vector has length {actual}, expected {expected}")]
    DimensionMismatch {
        layer: LayerKind,
        actual: usize,
        expected: usize,
    },
    /// Every layer needs at least one unit besides its bias.
    #[error("{layer} layer must have at least one unit")]
    EmptyLayer { layer: &'static str },
    /// A sample set whose inputs and targets cannot be paired one to one.
    #[error("sample set has {inputs} inputs but {targets} targets")]
    MismatchedSet { inputs: usize, targets: usize },
}
