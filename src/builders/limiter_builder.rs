//! Construct limiters from configuration.

use crate::config::LimiterConfig;
use crate::core::{Limiter, LimiterError, Spawn};

/// Build a limiter from validated configuration and a spawner.
///
/// # Errors
///
/// Returns [`LimiterError::InvalidConfig`] when the configuration fails
/// validation.
pub fn build_limiter<T, E, S>(
    cfg: &LimiterConfig,
    spawner: S,
) -> Result<Limiter<T, E, S>, LimiterError>
where
    T: Send + 'static,
    E: Send + 'static,
    S: Spawn + Send + Sync + 'static,
{
    cfg.validate().map_err(LimiterError::InvalidConfig)?;
    Limiter::new(cfg.limit, spawner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct NoopSpawner;

    impl Spawn for NoopSpawner {
        fn spawn<F>(&self, _fut: F)
        where
            F: std::future::Future<Output = ()> + Send + 'static,
        {
        }
    }

    #[test]
    fn builds_from_valid_config() {
        let cfg = LimiterConfig::new().with_limit(4);
        let limiter = build_limiter::<u32, String, _>(&cfg, NoopSpawner).unwrap();
        assert_eq!(limiter.limit(), 4);
    }

    #[test]
    fn rejects_invalid_config() {
        let cfg = LimiterConfig::new().with_limit(0);
        let err = build_limiter::<u32, String, _>(&cfg, NoopSpawner).unwrap_err();
        assert!(matches!(err, LimiterError::InvalidConfig(_)));
    }
}
