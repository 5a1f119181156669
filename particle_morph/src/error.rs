use thiserror::Error;

/// Errors raised by the morph engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MorphError {
    /// A replacement buffer does not have one point per particle.
    #[error("target buffer has {actual} points, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("invalid morph config: {0}")]
    InvalidConfig(String),
}

pub type MorphResult<T> = Result<T, MorphError>;
