//! Fixed-length feature vectors computed from binary pixel grids.
//!
//! A grid is a slice of equal-length rows; any non-zero pixel is foreground.

pub mod grid;

pub use grid::{
    density, horizontal_intercepts, horizontal_symmetry, region_avg, vertical_intercepts,
    vertical_symmetry, FeatureError, Intercepts,
};
