//! Runtime adapters implementing the [`Spawn`](crate::core::Spawn) trait.

#[cfg(feature = "tokio-runtime")]
pub mod tokio_spawner;

#[cfg(feature = "tokio-runtime")]
pub use tokio_spawner::TokioSpawner;
