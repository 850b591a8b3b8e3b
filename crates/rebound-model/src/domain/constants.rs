//! Default tunables for [`crate::BackoffConfig`].
//!
//! The values describe a moderate policy: the first retry lands around half a second later,
//! delays grow by half each round and never exceed a minute, and the whole session gives up
//! after fifteen minutes.
use std::time::Duration;

/// Base delay of the first retry, before jitter and scaling.
pub const DEFAULT_INITIAL_INTERVAL: Duration = Duration::from_millis(500);

/// Jitter half-width as a fraction of the current interval.
pub const DEFAULT_RANDOMIZATION_FACTOR: f64 = 0.5;

/// Growth factor applied to the jittered interval each round.
pub const DEFAULT_MULTIPLIER: f64 = 1.5;

/// Upper bound for a single delay.
pub const DEFAULT_MAX_INTERVAL: Duration = Duration::from_secs(60);

/// Total time budget of a retry session.
pub const DEFAULT_MAX_ELAPSED_TIME: Duration = Duration::from_secs(15 * 60);
