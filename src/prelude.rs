use thiserror::Error;

/// Error type for momentum_nn
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    /// Topology or hyperparameters can't describe a trainable network.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// A vector's length doesn't match the layer it is written to or read against.
    #[error("size mismatch: expected {expected} values, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    /// A (layer, from, to) triple addresses no connection.
    #[error("connection index out of range")]
    OutOfRange,
    /// The training worker panicked or the GUI could not be started.
    #[error("training thread failed")]
    Thread,
}

pub type Result<T> = std::result::Result<T, Error>;
