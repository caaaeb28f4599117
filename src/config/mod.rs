//! Configuration models for limiter construction.

pub mod limiter;

pub use limiter::{LimiterConfig, DEFAULT_LIMIT};
