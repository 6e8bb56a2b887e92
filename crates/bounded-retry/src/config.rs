//! Configuration for the retry executor

use crate::error::{ConfigError, ConfigResult};
use crate::retry::FixedDelay;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of retries after the initial attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default delay between attempts.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

/// Environment variable holding the retry count.
pub const ENV_MAX_RETRIES: &str = "RETRY_MAX_RETRIES";

/// Environment variable holding the delay in milliseconds.
pub const ENV_DELAY_MS: &str = "RETRY_DELAY_MS";

/// Configuration for a bounded retry invocation.
///
/// The delay is serialized as whole milliseconds under the `delay_ms` key, so
/// a TOML file looks like:
///
/// ```toml
/// max_retries = 5
/// delay_ms = 250
/// ```
///
/// Missing keys fall back to the defaults (3 retries, 1 second).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Number of retry attempts allowed after the initial attempt
    pub max_retries: u32,

    /// Delay applied before every retry
    #[serde(rename = "delay_ms", with = "duration_ms")]
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            delay: DEFAULT_DELAY,
        }
    }
}

impl RetryConfig {
    /// Create a configuration from explicit values.
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// Load configuration from environment variables.
    ///
    /// This will look for:
    /// - `RETRY_MAX_RETRIES` for the retry count
    /// - `RETRY_DELAY_MS` for the delay in milliseconds
    ///
    /// Unset variables keep their defaults. A variable that is set but does
    /// not parse is reported as [`ConfigError::InvalidEnv`].
    pub fn from_env() -> ConfigResult<Self> {
        use std::env;

        let mut config = Self::default();

        if let Ok(raw) = env::var(ENV_MAX_RETRIES) {
            config.max_retries = raw.trim().parse::<u32>().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_MAX_RETRIES,
                value: raw.clone(),
            })?;
        }

        if let Ok(raw) = env::var(ENV_DELAY_MS) {
            let millis = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_DELAY_MS,
                value: raw.clone(),
            })?;
            config.delay = Duration::from_millis(millis);
        }

        Ok(config)
    }

    /// Parse configuration from a TOML document.
    pub fn from_toml_str(input: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Parse configuration from a JSON document.
    pub fn from_json_str(input: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Merge this configuration with another, with the other taking precedence.
    ///
    /// Only fields of `other` that differ from the defaults override `self`.
    pub fn merge(mut self, other: RetryConfig) -> Self {
        if other.max_retries != DEFAULT_MAX_RETRIES {
            self.max_retries = other.max_retries;
        }
        if other.delay != DEFAULT_DELAY {
            self.delay = other.delay;
        }

        self
    }

    /// Build the fixed-delay strategy described by this configuration.
    pub fn strategy(&self) -> FixedDelay {
        FixedDelay::new(self.max_retries, self.delay)
    }
}

impl From<RetryConfig> for FixedDelay {
    fn from(config: RetryConfig) -> Self {
        config.strategy()
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(delay: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::RetryStrategy;

    #[test]
    fn test_defaults() {
        let config = RetryConfig::default();

        assert_eq!(config.max_retries, 3);
        assert_eq!(config.delay, Duration::from_secs(1));
    }

    #[test]
    fn test_from_toml() {
        let config = RetryConfig::from_toml_str("max_retries = 5\ndelay_ms = 250\n").unwrap();

        assert_eq!(config, RetryConfig::new(5, Duration::from_millis(250)));
    }

    #[test]
    fn test_from_toml_partial_uses_defaults() {
        let config = RetryConfig::from_toml_str("delay_ms = 10").unwrap();

        assert_eq!(config.max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(config.delay, Duration::from_millis(10));
    }

    #[test]
    fn test_from_toml_rejects_wrong_type() {
        let err = RetryConfig::from_toml_str("max_retries = \"many\"").unwrap_err();

        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_json_roundtrip_uses_millis() {
        let config = RetryConfig::new(0, Duration::from_millis(1));
        let json = serde_json::to_string(&config).unwrap();

        assert_eq!(json, r#"{"max_retries":0,"delay_ms":1}"#);
        assert_eq!(RetryConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_from_json_rejects_negative_delay() {
        let err = RetryConfig::from_json_str(r#"{"delay_ms": -5}"#).unwrap_err();

        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_from_env() {
        temp_env::with_vars(
            [(ENV_MAX_RETRIES, Some("7")), (ENV_DELAY_MS, Some("20"))],
            || {
                let config = RetryConfig::from_env().unwrap();
                assert_eq!(config, RetryConfig::new(7, Duration::from_millis(20)));
            },
        );
    }

    #[test]
    fn test_from_env_unset_keeps_defaults() {
        temp_env::with_vars_unset([ENV_MAX_RETRIES, ENV_DELAY_MS], || {
            assert_eq!(RetryConfig::from_env().unwrap(), RetryConfig::default());
        });
    }

    #[test]
    fn test_from_env_invalid_value() {
        temp_env::with_var(ENV_MAX_RETRIES, Some("-1"), || {
            match RetryConfig::from_env() {
                Err(ConfigError::InvalidEnv { var, value }) => {
                    assert_eq!(var, ENV_MAX_RETRIES);
                    assert_eq!(value, "-1");
                }
                other => panic!("Expected InvalidEnv, got {:?}", other),
            }
        });
    }

    #[test]
    fn test_merge_prefers_non_default_fields() {
        let base = RetryConfig::new(1, Duration::from_millis(5));
        let merged = base.merge(RetryConfig::new(DEFAULT_MAX_RETRIES, Duration::from_millis(50)));

        assert_eq!(merged.max_retries, 1);
        assert_eq!(merged.delay, Duration::from_millis(50));
    }

    #[test]
    fn test_strategy_conversion() {
        let strategy: FixedDelay = RetryConfig::new(2, Duration::from_millis(3)).into();

        assert_eq!(strategy.max_retries(), 2);
        assert_eq!(strategy.delay(), Duration::from_millis(3));
    }
}
