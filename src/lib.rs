pub mod neural;
pub mod prelude;
pub mod viz;

pub use neural::{trainer::Trainer, Hyperparams, Network};
