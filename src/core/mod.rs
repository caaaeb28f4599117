//! Core limiter: admission gate, pending queue, and completion dispatch.

pub mod error;
pub mod limiter;
pub mod operation;

pub use error::{AppResult, LimiterError, SubmitError};
pub use limiter::{Limiter, LimiterStats, Spawn, Submission};
pub use operation::{BoxedOperation, Job, OperationFuture};
