//! Retry loop driving a [`Session`](crate::Session).
use std::future::Future;

use rand::Rng;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::{backoff::Backoff, error::RetryError, failure::Failure};

impl<R: Rng> Backoff<R> {
    /// Run `op` until it succeeds, the elapsed-time budget is spent, or `cancel` fires.
    ///
    /// Every error is treated as retriable. On budget exhaustion the error of the last attempt is
    /// returned as [`RetryError::Operation`].
    ///
    /// Cancellation is observed only while waiting between attempts; a running attempt is never
    /// interrupted. Pass a fresh `CancellationToken::new()` when nothing can cancel the session.
    ///
    /// # Examples
    /// ```no_run
    /// use rebound_core::prelude::*;
    ///
    /// # async fn connect() -> Result<(), std::io::Error> { Ok(()) }
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut backoff = Backoff::new(BackoffConfig::default())?;
    /// let cancel = CancellationToken::new();
    ///
    /// backoff.retry(&cancel, || connect()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn retry<T, E, F, Fut>(
        &mut self,
        cancel: &CancellationToken,
        mut op: F,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.retry_classified(cancel, || {
            let fut = op();
            async move { fut.await.map_err(Failure::Transient) }
        })
        .await
    }

    /// Like [`Backoff::retry`], but `op` classifies its own failures.
    ///
    /// A [`Failure::Fatal`] ends the session at once with [`RetryError::Fatal`]: no budget check,
    /// no wait. A [`Failure::Transient`] follows the regular backoff path.
    pub async fn retry_classified<T, E, F, Fut>(
        &mut self,
        cancel: &CancellationToken,
        mut op: F,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, Failure<E>>>,
    {
        let mut session = self.begin();
        loop {
            let attempt = session.record_attempt();

            let err = match op().await {
                Ok(value) => {
                    trace!(attempt, "operation succeeded");
                    return Ok(value);
                }
                Err(Failure::Fatal(e)) => {
                    debug!(attempt, "operation failed with a non-retriable error");
                    return Err(RetryError::Fatal(e));
                }
                Err(Failure::Transient(e)) => e,
            };

            let Some(delay) = session.next_delay() else {
                debug!(
                    attempt,
                    elapsed_ms = session.elapsed().as_millis() as u64,
                    "retry budget exhausted; giving up",
                );
                return Err(RetryError::Operation(err));
            };
            debug!(
                attempt,
                delay_ms = delay.as_millis() as u64,
                "attempt failed; retry scheduled",
            );

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(attempt, "cancellation requested; retry aborted");
                    return Err(RetryError::Cancelled);
                }
                _ = tokio::time::sleep(delay) => {}
            }
            session.advance(delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rebound_model::BackoffConfig;
    use tokio::time::Instant;
    use tokio_util::sync::CancellationToken;

    use crate::{Backoff, Failure, RetryError};

    fn zero_jitter(max_elapsed_time: Duration) -> BackoffConfig {
        BackoffConfig {
            initial_interval: Duration::from_millis(100),
            randomization_factor: 0.0,
            multiplier: 2.0,
            max_interval: Duration::from_secs(1),
            max_elapsed_time,
        }
    }

    /// Timer deadlines are rounded up to the next millisecond tick.
    fn assert_elapsed(started: Instant, expected: Duration) {
        let elapsed = started.elapsed();
        assert!(
            elapsed >= expected && elapsed <= expected + Duration::from_millis(5),
            "expected ~{expected:?}, got {elapsed:?}"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn returns_immediately_on_first_success() {
        let mut backoff = Backoff::new(zero_jitter(Duration::ZERO)).unwrap();
        let cancel = CancellationToken::new();
        let started = Instant::now();
        let mut calls = 0u32;

        let res = backoff
            .retry(&cancel, || {
                calls += 1;
                async { Ok::<_, &str>("ready") }
            })
            .await;

        assert_eq!(res.unwrap(), "ready");
        assert_eq!(calls, 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_on_third_call_after_two_waits() {
        let mut backoff = Backoff::new(zero_jitter(Duration::ZERO)).unwrap();
        let cancel = CancellationToken::new();
        let started = Instant::now();
        let mut calls = 0u32;

        let res = backoff
            .retry(&cancel, || {
                calls += 1;
                let n = calls;
                async move { if n < 3 { Err("transient") } else { Ok(n) } }
            })
            .await;

        assert_eq!(res.unwrap(), 3);
        assert_eq!(calls, 3);
        // waits of 200ms and 400ms
        assert_elapsed(started, Duration::from_millis(600));
    }

    #[tokio::test(start_paused = true)]
    async fn waits_follow_the_clamped_progression() {
        let mut backoff = Backoff::new(zero_jitter(Duration::ZERO)).unwrap();
        let cancel = CancellationToken::new();
        let mut stamps = Vec::new();

        let res = backoff
            .retry(&cancel, || {
                stamps.push(Instant::now());
                let n = stamps.len();
                async move { if n < 7 { Err("down") } else { Ok(()) } }
            })
            .await;
        assert!(res.is_ok());

        let waits: Vec<u128> = stamps
            .windows(2)
            .map(|w| (w[1] - w[0]).as_millis())
            .collect();
        assert_eq!(waits, vec![200, 400, 800, 1000, 1000, 1000]);
    }

    #[tokio::test(start_paused = true)]
    async fn unbounded_budget_keeps_retrying() {
        let mut backoff = Backoff::new(zero_jitter(Duration::ZERO)).unwrap();
        let cancel = CancellationToken::new();
        let started = Instant::now();
        let mut calls = 0u32;

        let res = backoff
            .retry(&cancel, || {
                calls += 1;
                let n = calls;
                async move { if n <= 1000 { Err("still down") } else { Ok(()) } }
            })
            .await;

        assert!(res.is_ok());
        assert_eq!(calls, 1001);
        assert!(started.elapsed() > Duration::from_secs(900));
    }

    #[tokio::test(start_paused = true)]
    async fn budget_exhaustion_returns_last_operation_error() {
        let cfg = BackoffConfig {
            initial_interval: Duration::from_secs(1),
            ..zero_jitter(Duration::from_millis(500))
        };
        let mut backoff = Backoff::new(cfg).unwrap();
        let cancel = CancellationToken::new();
        let started = Instant::now();
        let mut calls = 0u32;

        let res = backoff
            .retry(&cancel, || {
                calls += 1;
                let n = calls;
                async move { Err::<(), _>(format!("failure #{n}")) }
            })
            .await;

        match res {
            Err(RetryError::Operation(e)) => assert_eq!(e, "failure #2"),
            other => panic!("expected operation error, got {other:?}"),
        }
        assert_eq!(calls, 2);
        assert!(started.elapsed() > Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_interrupts_pending_wait() {
        let mut backoff = Backoff::new(zero_jitter(Duration::ZERO)).unwrap();
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let started = Instant::now();
        let mut calls = 0u32;
        let res = backoff
            .retry(&cancel, || {
                calls += 1;
                async { Err::<(), _>("unavailable") }
            })
            .await;

        assert!(matches!(res, Err(RetryError::Cancelled)));
        assert_eq!(calls, 1);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(50));
        assert!(elapsed < Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn already_cancelled_token_still_runs_first_attempt() {
        let mut backoff = Backoff::new(zero_jitter(Duration::ZERO)).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let started = Instant::now();
        let mut calls = 0u32;
        let res = backoff
            .retry(&cancel, || {
                calls += 1;
                async { Err::<(), _>("unavailable") }
            })
            .await;

        assert!(res.unwrap_err().is_cancelled());
        assert_eq!(calls, 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn already_cancelled_token_does_not_block_success() {
        let mut backoff = Backoff::new(zero_jitter(Duration::ZERO)).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let res = backoff.retry(&cancel, || async { Ok::<_, ()>(5) }).await;
        assert_eq!(res.unwrap(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn fatal_failure_stops_without_waiting() {
        let mut backoff = Backoff::new(zero_jitter(Duration::ZERO)).unwrap();
        let cancel = CancellationToken::new();
        let started = Instant::now();
        let mut calls = 0u32;

        let res = backoff
            .retry_classified(&cancel, || {
                calls += 1;
                async { Err::<(), _>(Failure::fatal("unauthorized")) }
            })
            .await;

        match res {
            Err(RetryError::Fatal(e)) => assert_eq!(e, "unauthorized"),
            other => panic!("expected fatal error, got {other:?}"),
        }
        assert_eq!(calls, 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failures_precede_fatal() {
        let mut backoff = Backoff::new(zero_jitter(Duration::ZERO)).unwrap();
        let cancel = CancellationToken::new();
        let started = Instant::now();
        let mut calls = 0u32;

        let res = backoff
            .retry_classified(&cancel, || {
                calls += 1;
                let n = calls;
                async move {
                    if n < 3 {
                        Err::<(), _>(Failure::transient(n))
                    } else {
                        Err(Failure::fatal(n))
                    }
                }
            })
            .await;

        assert_eq!(res.unwrap_err().into_inner(), Some(3));
        assert_eq!(calls, 3);
        assert_elapsed(started, Duration::from_millis(600));
    }

    #[tokio::test(start_paused = true)]
    async fn sequential_sessions_start_fresh() {
        let cfg = BackoffConfig {
            initial_interval: Duration::from_secs(1),
            ..zero_jitter(Duration::from_millis(500))
        };
        let mut backoff = Backoff::new(cfg).unwrap();
        let cancel = CancellationToken::new();

        for _ in 0..2 {
            let mut calls = 0u32;
            let res = backoff
                .retry(&cancel, || {
                    calls += 1;
                    async { Err::<(), _>("down") }
                })
                .await;

            assert!(matches!(res, Err(RetryError::Operation("down"))));
            assert_eq!(calls, 2, "each session gets its own elapsed-time budget");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn seeded_controllers_wait_identically() {
        let cfg = BackoffConfig {
            randomization_factor: 0.5,
            ..zero_jitter(Duration::ZERO)
        };

        let mut runs = Vec::new();
        for _ in 0..2 {
            let mut backoff = Backoff::seeded(cfg, 17).unwrap();
            let cancel = CancellationToken::new();
            let mut stamps = Vec::new();

            backoff
                .retry(&cancel, || {
                    stamps.push(Instant::now());
                    let n = stamps.len();
                    async move { if n < 8 { Err("down") } else { Ok(()) } }
                })
                .await
                .unwrap();

            let waits: Vec<u128> = stamps
                .windows(2)
                .map(|w| (w[1] - w[0]).as_millis())
                .collect();
            runs.push(waits);
        }

        assert_eq!(runs[0], runs[1]);
        assert!(runs[0].iter().all(|ms| *ms <= cfg.max_interval.as_millis()));
    }
}
