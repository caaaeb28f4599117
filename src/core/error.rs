//! Error types for limiter operations.

use std::fmt;

use thiserror::Error;

/// Errors produced when constructing or configuring a limiter.
///
/// Submission itself is infallible; the only failures the limiter generates
/// on its own are construction-time misconfigurations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LimiterError {
    /// The concurrency ceiling cannot admit any work.
    #[error("concurrency limit must be at least 1 (got {0})")]
    LimitTooLow(usize),
    /// Configuration failed validation or parsing.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Outcome of awaiting a [`Submission`](crate::core::Submission) whose
/// operation did not succeed.
///
/// `E` is the caller's own error type and is deliberately unconstrained, so
/// `Display`/`Error` are implemented manually rather than derived.
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitError<E> {
    /// The operation ran and failed with its own error, passed through
    /// verbatim. Never retried; never affects sibling operations.
    Failed(E),

    /// The operation terminated without settling (it panicked, or the
    /// runtime dropped it during shutdown). The admission slot was still
    /// released.
    Lost,
}

impl<E> SubmitError<E> {
    /// Extract the operation's own error, if there is one.
    pub fn into_failure(self) -> Option<E> {
        match self {
            Self::Failed(e) => Some(e),
            Self::Lost => None,
        }
    }
}

impl<E: fmt::Display> fmt::Display for SubmitError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(e) => write!(f, "operation failed: {e}"),
            Self::Lost => write!(f, "operation terminated without settling"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for SubmitError<E> {}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
