//! Retry with exponential backoff and jitter.
//!
//! A [`Backoff`] controller owns a validated [`rebound_model::BackoffConfig`] and a random source.
//! Each call to [`Backoff::retry`] runs one retry session: the operation is invoked, and on failure
//! the controller waits a randomized, exponentially growing delay before the next attempt.
//! The session ends on success, when the elapsed-time budget runs out, or when the caller's
//! [`tokio_util::sync::CancellationToken`] fires during a wait.
//!
//! ```text
//! Idle ─► Attempting ──ok──────────► Succeeded
//!             │  ├──fatal─────────► Failed
//!             │  └──budget spent──► StoppedByBudget
//!             ▼
//!          Waiting ──timer──► Attempting
//!             └──cancelled──► Cancelled
//! ```
pub mod backoff;
pub mod error;
pub mod failure;

mod retry;

pub use backoff::{Backoff, Session, next_interval};
pub use error::RetryError;
pub use failure::Failure;
pub use rebound_model::{BackoffConfig, ModelError};

pub mod prelude {
    pub use crate::backoff::{Backoff, Session};
    pub use crate::error::RetryError;
    pub use crate::failure::Failure;
    pub use rebound_model::BackoffConfig;
    pub use tokio_util::sync::CancellationToken;
}
