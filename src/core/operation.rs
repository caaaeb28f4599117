//! Operation types: the boundary contract between callers and the limiter.
//!
//! The limiter never inspects the work it runs. An operation is a
//! zero-argument callable that produces a future settling with `Result<T, E>`;
//! the limiter is fully generic over `T` and `E` and imposes nothing on them
//! beyond `Send + 'static`.

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;

/// Boxed future produced by invoking an operation.
pub type OperationFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;

/// Type-erased operation as stored in the pending queue.
///
/// Exclusively owned by its pending item until dispatch, at which point the
/// limiter invokes it once and drops its own reference.
pub type BoxedOperation<T, E> = Box<dyn FnOnce() -> OperationFuture<T, E> + Send>;

/// Trait-object submission path for callers that prefer a named job type
/// over a closure.
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use taskgate::core::Job;
///
/// struct Thumbnail {
///     source: std::path::PathBuf,
/// }
///
/// #[async_trait]
/// impl Job<Vec<u8>, std::io::Error> for Thumbnail {
///     async fn run(&self) -> Result<Vec<u8>, std::io::Error> {
///         tokio::fs::read(&self.source).await
///     }
/// }
/// ```
#[async_trait]
pub trait Job<T, E>: Send + Sync {
    /// Execute the job, producing its result or error.
    ///
    /// Called at most once per submission, only after the limiter has
    /// granted an admission slot.
    async fn run(&self) -> Result<T, E>;
}
