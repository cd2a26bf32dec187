pub mod backprop;
pub mod episode;
pub mod epoch;

pub use episode::Episodes;
pub use epoch::{train_epoch, EpochStats};
