pub mod unit;

pub use unit::{sigmoid, ActivationUnit};
