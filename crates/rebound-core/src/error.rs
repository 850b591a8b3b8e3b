use thiserror::Error;

/// Terminal outcome of a retry session that did not succeed.
///
/// The operation's own error is never inspected by the controller; it is handed back as-is.
/// Callers tell "gave up" apart from "was cancelled" by the variant.
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// The elapsed-time budget ran out; carries the error of the last attempt.
    #[error("retry budget exhausted: {0}")]
    Operation(E),

    /// The operation reported a failure that must not be retried.
    #[error("non-retriable failure: {0}")]
    Fatal(E),

    /// The cancellation token fired while waiting for the next attempt.
    #[error("retry cancelled")]
    Cancelled,
}

impl<E> RetryError<E> {
    /// Returns `true` if the session ended because of cancellation.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RetryError::Cancelled)
    }

    /// Borrow the operation error, if any.
    pub fn as_inner(&self) -> Option<&E> {
        match self {
            RetryError::Operation(e) | RetryError::Fatal(e) => Some(e),
            RetryError::Cancelled => None,
        }
    }

    /// Consume and return the operation error, if any.
    pub fn into_inner(self) -> Option<E> {
        match self {
            RetryError::Operation(e) | RetryError::Fatal(e) => Some(e),
            RetryError::Cancelled => None,
        }
    }
}
