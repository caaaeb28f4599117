//! # Taskgate
//!
//! A bounded-concurrency task runner with strict FIFO admission.
//!
//! This library provides a small coordination layer that accepts an unbounded
//! stream of asynchronous operations and executes at most N of them
//! simultaneously. Operations beyond the concurrency ceiling are parked in a
//! submission-ordered queue and dispatched as admission slots free up, while
//! every caller keeps its own individually awaitable handle for the outcome.
//!
//! ## Core Problem Solved
//!
//! Fan-out async code routinely needs to cap how much of it runs at once:
//!
//! - **Upstream limits**: APIs, databases, and devices reject or degrade
//!   under too many in-flight requests
//! - **Local resources**: connection pools, file descriptors, and memory are
//!   finite even when the work itself is unbounded
//! - **Fairness**: callers expect work to start in the order it was handed
//!   over, not whenever the runtime happens to poll it
//!
//! ## Key Features
//!
//! - **Admission gate**: at most `limit` operations execute at any instant
//! - **FIFO queue**: strict submission-order dispatch, no priorities
//! - **Per-caller handles**: each `submit` returns a future that settles
//!   exactly once with that operation's own result or error
//! - **Eager slot reuse**: every completion immediately admits the next
//!   queued operation until the gate is full or the queue is drained
//! - **Runtime-agnostic core**: execution is delegated through the
//!   [`Spawn`](crate::core::Spawn) trait; a Tokio adapter ships behind the
//!   default `tokio-runtime` feature
//!
//! ## Example
//!
//! ```rust,ignore
//! use taskgate::core::Limiter;
//! use taskgate::runtime::TokioSpawner;
//!
//! let spawner = TokioSpawner::new(tokio::runtime::Handle::current());
//! let limiter: Limiter<String, std::io::Error, _> = Limiter::new(2, spawner)?;
//!
//! let handle = limiter.submit(|| async {
//!     // fetch, compute, etc.
//!     Ok("done".to_string())
//! });
//!
//! let value = handle.await?;
//! ```
//!
//! For complete examples, see:
//! - `tests/limiter_test.rs` - Full integration tests
//! - `README.md` - Comprehensive documentation

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core limiter: admission gate, pending queue, and completion dispatch.
pub mod core;
/// Configuration models for limiter construction.
pub mod config;
/// Builders to construct limiters from configuration.
pub mod builders;
/// Runtime adapters implementing the [`Spawn`](crate::core::Spawn) trait.
pub mod runtime;
/// Shared utilities.
pub mod util;
