use std::time::Duration;

use serde::{Deserialize, Serialize};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

use crate::domain::{
    DEFAULT_INITIAL_INTERVAL, DEFAULT_MAX_ELAPSED_TIME, DEFAULT_MAX_INTERVAL, DEFAULT_MULTIPLIER,
    DEFAULT_RANDOMIZATION_FACTOR,
};
use crate::error::{ModelError, ModelResult};

/// Tunables of an exponential backoff with jitter.
///
/// Each retry delay is derived from the previous one:
/// the current interval is jittered by `± current * randomization_factor`, then scaled by `multiplier`
/// and clamped to `max_interval`. The whole retry session is bounded by `max_elapsed_time`,
/// measured from the first attempt.
///
/// The value is immutable once handed to a controller and can be shared freely between controllers.
///
/// Serialized form uses camelCase keys and integer milliseconds for durations:
/// ```json
/// { "initialIntervalMs": 100, "randomizationFactor": 0.5, "multiplier": 2.0, "maxIntervalMs": 1000, "maxElapsedTimeMs": 0 }
/// ```
/// Missing keys fall back to [`BackoffConfig::default`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(default, rename_all = "camelCase")]
pub struct BackoffConfig {
    /// Base of the first retry delay, before jitter and scaling.
    #[serde(rename = "initialIntervalMs", with = "crate::domain::millis")]
    #[cfg_attr(feature = "schema", schemars(with = "u64"))]
    pub initial_interval: Duration,
    /// Fraction of the current interval used as jitter half-width, in `[0, 1]`.
    pub randomization_factor: f64,
    /// Growth factor applied to the jittered interval, must be `> 0`.
    pub multiplier: f64,
    /// Ceiling for a single delay.
    #[serde(rename = "maxIntervalMs", with = "crate::domain::millis")]
    #[cfg_attr(feature = "schema", schemars(with = "u64"))]
    pub max_interval: Duration,
    /// Total time budget of a retry session; zero means unbounded.
    #[serde(rename = "maxElapsedTimeMs", with = "crate::domain::millis")]
    #[cfg_attr(feature = "schema", schemars(with = "u64"))]
    pub max_elapsed_time: Duration,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial_interval: DEFAULT_INITIAL_INTERVAL,
            randomization_factor: DEFAULT_RANDOMIZATION_FACTOR,
            multiplier: DEFAULT_MULTIPLIER,
            max_interval: DEFAULT_MAX_INTERVAL,
            max_elapsed_time: DEFAULT_MAX_ELAPSED_TIME,
        }
    }
}

impl BackoffConfig {
    /// Validate the tunables before they reach a controller.
    ///
    /// Rules:
    /// - `multiplier` is finite and strictly positive;
    /// - `randomization_factor` is finite and within `[0, 1]`.
    ///
    /// Durations are not checked: a zero `initial_interval` or `max_interval` is a legal (if degenerate)
    /// configuration that retries without delay.
    pub fn validate(&self) -> ModelResult<()> {
        if !self.multiplier.is_finite() || self.multiplier <= 0.0 {
            return Err(ModelError::InvalidMultiplier(self.multiplier));
        }
        if !self.randomization_factor.is_finite()
            || !(0.0..=1.0).contains(&self.randomization_factor)
        {
            return Err(ModelError::InvalidRandomizationFactor(
                self.randomization_factor,
            ));
        }
        Ok(())
    }

    /// Returns `true` when the session has no elapsed-time budget.
    #[inline]
    pub fn is_unbounded(&self) -> bool {
        self.max_elapsed_time.is_zero()
    }
}
