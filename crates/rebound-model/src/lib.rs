mod domain;
pub use domain::{
    DEFAULT_INITIAL_INTERVAL, DEFAULT_MAX_ELAPSED_TIME, DEFAULT_MAX_INTERVAL, DEFAULT_MULTIPLIER,
    DEFAULT_RANDOMIZATION_FACTOR,
};

mod error;
pub use error::{ModelError, ModelResult};

mod backoff;
pub use backoff::BackoffConfig;
