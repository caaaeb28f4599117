//! Bounded-concurrency limiter: admission gate, pending queue, and
//! completion dispatch.
//!
//! The limiter tracks one number (`running`) and one FIFO queue. Submission
//! appends a pending item and runs a dispatch pass; every completion
//! releases its admission slot and runs another pass, so a backlog keeps
//! the gate continuously full until drained. Dispatch is a loop, not
//! recursion, so stack depth stays bounded under long queues.
//!
//! Per-item lifecycle: `Queued -> Running -> Completed(success|failure)`.
//! Transitions are one-directional; there are no retries and no re-queuing.
//! The single extra edge is `Queued -> Abandoned`, taken when a caller drops
//! its [`Submission`] handle before the item is dispatched.

use std::collections::VecDeque;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use futures::FutureExt;
use parking_lot::Mutex;

use crate::core::error::{LimiterError, SubmitError};
use crate::core::operation::{BoxedOperation, Job, OperationFuture};

/// Abstraction for spawning operation execution on a runtime.
pub trait Spawn {
    /// Spawn an async task that runs to completion in the background.
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static;
}

/// One submitted-but-not-dispatched unit of work.
///
/// Exclusively owns its operation until dispatch; the reply channel is the
/// item's only identity and fires exactly once.
struct PendingItem<T, E> {
    operation: BoxedOperation<T, E>,
    reply: oneshot::Sender<Result<T, E>>,
}

/// Shared mutable state: the critical section of the limiter.
///
/// Only ever touched at submit and at completion, and never across an
/// `.await`, so the admission check-and-increment is atomic under the lock.
struct LimiterState<T, E> {
    /// Number of operations currently executing. Invariant:
    /// `0 <= running <= limit`.
    running: usize,
    /// Submission-ordered pending items. Removed from the front exactly
    /// once, in the order they were appended.
    queue: VecDeque<PendingItem<T, E>>,
}

/// Internal counters for limiter statistics (thread-safe).
#[derive(Debug, Default)]
struct LimiterCounters {
    submitted: AtomicU64,
    completed: AtomicU64,
    failed: AtomicU64,
    abandoned: AtomicU64,
}

/// Snapshot of limiter utilization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LimiterStats {
    /// Configured concurrency ceiling.
    pub limit: usize,
    /// Operations executing right now.
    pub running: usize,
    /// Operations waiting in the queue.
    pub queued: usize,
    /// Total operations submitted.
    pub submitted: u64,
    /// Total operations that completed successfully.
    pub completed: u64,
    /// Total operations that failed or panicked.
    pub failed: u64,
    /// Total queued operations discarded because their handle was dropped
    /// before dispatch.
    pub abandoned: u64,
}

struct Inner<T, E, S> {
    limit: usize,
    state: Mutex<LimiterState<T, E>>,
    counters: LimiterCounters,
    spawner: S,
}

/// Bounded-concurrency task runner.
///
/// Executes at most `limit` submitted operations simultaneously, parking
/// the rest in a strict FIFO queue. Generic over the operation result `T`,
/// the operation error `E`, and the runtime spawner `S`; `T` and `E` carry
/// no bounds beyond `Send + 'static`.
///
/// Cloning is cheap and shares the same gate and queue.
pub struct Limiter<T, E, S> {
    inner: Arc<Inner<T, E, S>>,
}

impl<T, E, S> std::fmt::Debug for Limiter<T, E, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Limiter")
            .field("limit", &self.inner.limit)
            .finish_non_exhaustive()
    }
}

impl<T, E, S> Clone for Limiter<T, E, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, E, S> Limiter<T, E, S>
where
    T: Send + 'static,
    E: Send + 'static,
    S: Spawn + Send + Sync + 'static,
{
    /// Create a limiter with the given concurrency ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`LimiterError::LimitTooLow`] when `limit` is zero: a gate
    /// that can never admit work is a caller bug, surfaced at construction
    /// rather than as a silent hang.
    pub fn new(limit: usize, spawner: S) -> Result<Self, LimiterError> {
        if limit == 0 {
            return Err(LimiterError::LimitTooLow(limit));
        }
        Ok(Self {
            inner: Arc::new(Inner {
                limit,
                state: Mutex::new(LimiterState {
                    running: 0,
                    queue: VecDeque::new(),
                }),
                counters: LimiterCounters::default(),
                spawner,
            }),
        })
    }

    /// Submit an operation for execution, returning an awaitable handle.
    ///
    /// The operation is invoked once an admission slot is granted; if the
    /// gate is full it waits in the queue in submission order. Submission
    /// itself never fails and never blocks, and is safe to call from inside
    /// a running operation.
    ///
    /// The returned [`Submission`] settles exactly once with the
    /// operation's own result or error. Dropping the handle before the
    /// operation is dispatched cancels the queued item; dropping it later
    /// does not abort the running operation.
    pub fn submit<F, Fut>(&self, operation: F) -> Submission<T, E>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let (reply, receiver) = oneshot::channel();
        let operation: BoxedOperation<T, E> = Box::new(move || {
            let fut: OperationFuture<T, E> = Box::pin(operation());
            fut
        });

        let depth = {
            let mut state = self.inner.state.lock();
            state.queue.push_back(PendingItem { operation, reply });
            state.queue.len()
        };
        self.inner.counters.submitted.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(depth, "operation submitted");

        dispatch(&self.inner);
        Submission { receiver }
    }

    /// Submit a [`Job`] trait object.
    ///
    /// Convenience over [`submit`](Self::submit) for callers that model
    /// work as named types rather than closures.
    pub fn submit_job(&self, job: Arc<dyn Job<T, E>>) -> Submission<T, E> {
        self.submit(move || async move { job.run().await })
    }

    /// The configured concurrency ceiling.
    pub fn limit(&self) -> usize {
        self.inner.limit
    }

    /// Take a snapshot of current utilization and lifetime counters.
    pub fn stats(&self) -> LimiterStats {
        let (running, queued) = {
            let state = self.inner.state.lock();
            (state.running, state.queue.len())
        };
        LimiterStats {
            limit: self.inner.limit,
            running,
            queued,
            submitted: self.inner.counters.submitted.load(Ordering::Relaxed),
            completed: self.inner.counters.completed.load(Ordering::Relaxed),
            failed: self.inner.counters.failed.load(Ordering::Relaxed),
            abandoned: self.inner.counters.abandoned.load(Ordering::Relaxed),
        }
    }
}

/// Run one dispatch pass: admit queued items until the gate is full or the
/// queue is empty.
///
/// Called after every submit and from every completion. Each admitted item
/// is executed on the spawner; its completion releases the slot, delivers
/// the result over the item's reply channel, and runs another pass so slot
/// reuse is eager.
fn dispatch<T, E, S>(inner: &Arc<Inner<T, E, S>>)
where
    T: Send + 'static,
    E: Send + 'static,
    S: Spawn + Send + Sync + 'static,
{
    loop {
        let item = {
            let mut state = inner.state.lock();
            if state.running >= inner.limit {
                return;
            }
            let item = loop {
                let Some(item) = state.queue.pop_front() else {
                    return;
                };
                if item.reply.is_canceled() {
                    // Caller dropped its handle while queued; discard
                    // without consuming a slot.
                    inner.counters.abandoned.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!("discarding abandoned queued operation");
                    continue;
                }
                break item;
            };
            state.running += 1;
            item
        };

        let slot = Arc::clone(inner);
        inner.spawner.spawn(async move {
            tracing::debug!("operation dispatched");
            let outcome = AssertUnwindSafe((item.operation)()).catch_unwind().await;

            // Release the slot before delivering, so a caller that observes
            // its result never sees the slot still held. Panics release the
            // slot too; only the caller-supplied future unwound.
            {
                let mut state = slot.state.lock();
                state.running -= 1;
            }

            match outcome {
                Ok(result) => {
                    if result.is_ok() {
                        slot.counters.completed.fetch_add(1, Ordering::Relaxed);
                    } else {
                        slot.counters.failed.fetch_add(1, Ordering::Relaxed);
                    }
                    tracing::debug!(ok = result.is_ok(), "operation settled");
                    // Pass-through, verbatim. A receiver that has gone away
                    // is not an error.
                    let _ = item.reply.send(result);
                }
                Err(_panic) => {
                    slot.counters.failed.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!("operation panicked; reporting submission as lost");
                    // Dropping the sender surfaces `SubmitError::Lost`.
                    drop(item.reply);
                }
            }

            dispatch(&slot);
        });
    }
}

/// Awaitable handle for one submitted operation.
///
/// Settles exactly once: `Ok` with the operation's value, or `Err` with
/// [`SubmitError::Failed`] carrying the operation's own error. Dropping the
/// handle before dispatch cancels the queued item.
#[must_use = "a Submission settles only when awaited; dropping it cancels the operation if still queued"]
#[derive(Debug)]
pub struct Submission<T, E> {
    receiver: oneshot::Receiver<Result<T, E>>,
}

impl<T, E> Future for Submission<T, E> {
    type Output = Result<T, SubmitError<E>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let receiver = &mut self.get_mut().receiver;
        Pin::new(receiver).poll(cx).map(|settled| match settled {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(error)) => Err(SubmitError::Failed(error)),
            Err(_canceled) => Err(SubmitError::Lost),
        })
    }
}
