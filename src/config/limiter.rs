//! Limiter configuration structures.

use serde::{Deserialize, Serialize};

/// Concurrency ceiling used when none is specified.
pub const DEFAULT_LIMIT: usize = 3;

/// Limiter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimiterConfig {
    /// Maximum simultaneously executing operations.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

const fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
        }
    }
}

impl LimiterConfig {
    /// Create a configuration with the default limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the concurrency ceiling.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.limit == 0 {
            return Err("limit must be greater than 0".into());
        }
        Ok(())
    }

    /// Parse a limiter configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// Returns a description of the parse or validation failure.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limit_is_three() {
        assert_eq!(LimiterConfig::default().limit, 3);
        assert_eq!(LimiterConfig::new().limit, 3);
    }

    #[test]
    fn with_limit_overrides_default() {
        let cfg = LimiterConfig::new().with_limit(8);
        assert_eq!(cfg.limit, 8);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_limit_is_invalid() {
        let cfg = LimiterConfig::new().with_limit(0);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn parses_json() {
        let cfg = LimiterConfig::from_json_str(r#"{"limit": 5}"#).unwrap();
        assert_eq!(cfg.limit, 5);
    }

    #[test]
    fn missing_limit_falls_back_to_default() {
        let cfg = LimiterConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(LimiterConfig::from_json_str(r#"{"limit": 0}"#).is_err());
        assert!(LimiterConfig::from_json_str("not json").is_err());
    }
}
