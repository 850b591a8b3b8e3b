use std::time::Duration;

use rand::Rng;
use rebound_model::BackoffConfig;

/// Compute the delay that follows `current`.
///
/// Steps:
/// 1. `delta = current * randomization_factor`;
/// 2. draw uniformly from the closed range `[current - delta, current + delta]`;
/// 3. if the draw is already `>= max_interval / multiplier`, return `max_interval`,
///    otherwise scale it by `multiplier`.
///
/// Arithmetic is done on nanoseconds as `f64`. A zero `delta` consumes no entropy.
/// The result never exceeds `max_interval`.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use rand::{SeedableRng, rngs::StdRng};
/// use rebound_core::{BackoffConfig, next_interval};
///
/// let cfg = BackoffConfig {
///     initial_interval: Duration::from_millis(100),
///     randomization_factor: 0.0,
///     multiplier: 2.0,
///     max_interval: Duration::from_secs(1),
///     max_elapsed_time: Duration::ZERO,
/// };
/// let mut rng = StdRng::seed_from_u64(0);
///
/// assert_eq!(next_interval(&cfg, Duration::from_millis(100), &mut rng), Duration::from_millis(200));
/// assert_eq!(next_interval(&cfg, Duration::from_millis(800), &mut rng), Duration::from_secs(1));
/// ```
pub fn next_interval<R>(config: &BackoffConfig, current: Duration, rng: &mut R) -> Duration
where
    R: Rng,
{
    let current = current.as_nanos() as f64;
    let delta = current * config.randomization_factor;

    let jittered = if delta > 0.0 {
        rng.gen_range((current - delta)..=(current + delta))
    } else {
        current
    };

    let max = config.max_interval.as_nanos() as f64;
    if jittered >= max / config.multiplier {
        return config.max_interval;
    }
    Duration::from_nanos((jittered * config.multiplier) as u64)
}
