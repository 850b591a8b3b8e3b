use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("invalid multiplier: {0} (expected a finite value > 0)")]
    InvalidMultiplier(f64),

    #[error("invalid randomization factor: {0} (expected a finite value in [0, 1])")]
    InvalidRandomizationFactor(f64),
}

pub type ModelResult<T> = Result<T, ModelError>;
