use std::time::Duration;

use rand::Rng;
use tokio::time::Instant;

use super::{Backoff, next_interval};

/// State of one retry session.
///
/// Created by [`Backoff::begin`]; holds the session start time, the running interval and
/// the number of attempts made so far.
/// The session borrows its controller mutably, so the controller cannot start another session
/// until this one is dropped.
pub struct Session<'a, R> {
    backoff: &'a mut Backoff<R>,
    started_at: Instant,
    current: Duration,
    attempts: u32,
}

impl<'a, R: Rng> Session<'a, R> {
    pub(super) fn new(backoff: &'a mut Backoff<R>) -> Self {
        let current = backoff.config.initial_interval;
        Self {
            backoff,
            started_at: Instant::now(),
            current,
            attempts: 0,
        }
    }

    /// Compute the delay following `current`, or `None` once the elapsed-time budget is spent.
    ///
    /// The budget is only checked here, lazily; it never interrupts an attempt or a wait.
    pub fn next(&mut self, current: Duration) -> Option<Duration> {
        let config = self.backoff.config;
        if !config.is_unbounded() && self.elapsed() > config.max_elapsed_time {
            return None;
        }
        Some(next_interval(&config, current, &mut self.backoff.rng))
    }

    /// Shorthand for [`Session::next`] applied to the session's current interval.
    pub fn next_delay(&mut self) -> Option<Duration> {
        self.next(self.current)
    }

    /// Record that a wait of `next` completed and make it the new base interval.
    pub fn advance(&mut self, next: Duration) {
        self.current = next;
    }

    /// Running base interval.
    pub fn current(&self) -> Duration {
        self.current
    }

    /// Time since the session started.
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Number of attempts recorded in this session.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub(crate) fn record_attempt(&mut self) -> u32 {
        self.attempts = self.attempts.saturating_add(1);
        self.attempts
    }
}
