//! Backoff controller and its per-session state.
//!
//! [`Backoff`] is long-lived and holds only immutable configuration plus the random source.
//! Everything that changes while retrying (start time, current interval, attempt count) lives
//! in a [`Session`] that mutably borrows the controller, so two sessions can never overlap on
//! the same controller.
mod interval;
pub use interval::next_interval;

mod session;
pub use session::Session;

use std::fmt;

use rand::{SeedableRng, rngs::StdRng};
use rebound_model::{BackoffConfig, ModelResult};

/// Exponential backoff controller.
///
/// The random source defaults to [`StdRng`] seeded from OS entropy.
/// Use [`Backoff::seeded`] or [`Backoff::with_rng`] for reproducible delay sequences.
pub struct Backoff<R = StdRng> {
    pub(crate) config: BackoffConfig,
    pub(crate) rng: R,
}

impl Backoff<StdRng> {
    /// Create a controller with an entropy-seeded random source.
    ///
    /// Fails if the config does not pass [`BackoffConfig::validate`].
    pub fn new(config: BackoffConfig) -> ModelResult<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a controller whose jitter is fully determined by `seed`.
    pub fn seeded(config: BackoffConfig, seed: u64) -> ModelResult<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: rand::Rng> Backoff<R> {
    /// Create a controller with a caller-supplied random source.
    pub fn with_rng(config: BackoffConfig, rng: R) -> ModelResult<Self> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    /// Configuration this controller was built with.
    pub fn config(&self) -> &BackoffConfig {
        &self.config
    }

    /// Start a new retry session.
    ///
    /// The elapsed-time budget is measured from this call and the current interval is reset to
    /// `initial_interval`.
    pub fn begin(&mut self) -> Session<'_, R> {
        Session::new(self)
    }
}

impl<R> fmt::Debug for Backoff<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backoff")
            .field("config", &self.config)
            .field("rng", &"<rng>")
            .finish()
    }
}
