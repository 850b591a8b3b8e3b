/// Classified failure of a single attempt.
///
/// Returned by operations passed to [`crate::Backoff::retry_classified`]:
/// - `Transient`: retry after the next backoff delay (subject to the elapsed-time budget).
/// - `Fatal`: stop immediately and surface the error as [`crate::RetryError::Fatal`].
///
/// [`crate::Backoff::retry`] treats every error as `Transient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure<E> {
    /// Retriable failure.
    Transient(E),
    /// Failure that must end the session.
    Fatal(E),
}

impl<E> Failure<E> {
    /// Wrap an error as retriable.
    pub fn transient(e: E) -> Self {
        Failure::Transient(e)
    }

    /// Wrap an error as non-retriable.
    pub fn fatal(e: E) -> Self {
        Failure::Fatal(e)
    }

    #[inline]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Failure::Fatal(_))
    }

    /// Drop the classification and return the error.
    pub fn into_inner(self) -> E {
        match self {
            Failure::Transient(e) | Failure::Fatal(e) => e,
        }
    }
}
