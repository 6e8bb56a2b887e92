//! Error types for the retry executor.
//!
//! Two families live here:
//!
//! - [`RetryError`] - the terminal outcome of an invocation that never
//!   observed a success. It always carries the number of attempts made and,
//!   where one exists, the last failure reported by the operation.
//! - [`ConfigError`] - problems loading a [`RetryConfig`](crate::config::RetryConfig).

use thiserror::Error;

/// Result type alias for loading configuration.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Terminal failure of a retry invocation.
///
/// Individual operation failures are recovered locally by scheduling another
/// attempt. Only when the retry budget is spent (or the invocation is
/// cancelled while waiting) does the caller see one of these.
///
/// # Examples
///
/// ```rust
/// use bounded_retry::error::RetryError;
///
/// let err: RetryError<std::io::Error> = RetryError::Exhausted {
///     attempts: 3,
///     last_error: std::io::Error::other("timeout"),
/// };
///
/// assert!(err.is_exhausted());
/// assert_eq!(err.attempts(), 3);
/// assert_eq!(
///     err.to_string(),
///     "maximum retries exhausted after 3 attempts"
/// );
/// // The cause is reachable through `source()`, not the message.
/// assert_eq!(
///     std::error::Error::source(&err).map(|e| e.to_string()),
///     Some("timeout".to_string())
/// );
/// ```
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// Every allowed attempt failed.
    #[error("maximum retries exhausted after {attempts} attempts")]
    Exhausted {
        /// Total number of invocations of the operation (initial + retries).
        attempts: u32,
        /// Failure reported by the final attempt.
        #[source]
        last_error: E,
    },

    /// The cancellation token fired while waiting between attempts.
    #[error("retry cancelled after {attempts} attempts")]
    Cancelled {
        /// Number of invocations made before cancellation was observed.
        attempts: u32,
        /// Failure reported by the most recent attempt, if any.
        last_error: Option<E>,
    },
}

impl<E> RetryError<E> {
    /// Number of times the operation was invoked.
    pub fn attempts(&self) -> u32 {
        match self {
            RetryError::Exhausted { attempts, .. } | RetryError::Cancelled { attempts, .. } => {
                *attempts
            }
        }
    }

    /// Whether the retry budget was used up.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, RetryError::Exhausted { .. })
    }

    /// Whether the invocation was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RetryError::Cancelled { .. })
    }

    /// Borrow the last failure reported by the operation.
    pub fn last_error(&self) -> Option<&E> {
        match self {
            RetryError::Exhausted { last_error, .. } => Some(last_error),
            RetryError::Cancelled { last_error, .. } => last_error.as_ref(),
        }
    }

    /// Take ownership of the last failure reported by the operation.
    pub fn into_last_error(self) -> Option<E> {
        match self {
            RetryError::Exhausted { last_error, .. } => Some(last_error),
            RetryError::Cancelled { last_error, .. } => last_error,
        }
    }
}

/// Errors raised while building a [`RetryConfig`](crate::config::RetryConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable was set but could not be parsed.
    #[error("invalid value {value:?} for environment variable {var}")]
    InvalidEnv {
        /// Variable name
        var: &'static str,
        /// Raw value that failed to parse
        value: String,
    },

    /// TOML document could not be parsed.
    #[error("invalid TOML retry config: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON document could not be parsed.
    #[error("invalid JSON retry config: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn test_exhausted_exposes_source() {
        let err = RetryError::Exhausted {
            attempts: 4,
            last_error: io::Error::other("network error"),
        };

        let source = err.source().expect("exhausted error has a source");
        assert_eq!(source.to_string(), "network error");
        // The cause is only reported once when walking the chain.
        assert!(!err.to_string().contains("network error"));
        assert_eq!(err.attempts(), 4);
        assert!(!err.is_cancelled());
    }

    #[test]
    fn test_cancelled_without_failure() {
        let err: RetryError<io::Error> = RetryError::Cancelled {
            attempts: 1,
            last_error: None,
        };

        assert!(err.is_cancelled());
        assert!(err.last_error().is_none());
        assert_eq!(err.to_string(), "retry cancelled after 1 attempts");
    }

    #[test]
    fn test_into_last_error() {
        let err = RetryError::Cancelled {
            attempts: 2,
            last_error: Some("timeout"),
        };

        assert_eq!(err.into_last_error(), Some("timeout"));
    }

    #[test]
    fn test_invalid_env_message() {
        let err = ConfigError::InvalidEnv {
            var: "RETRY_MAX_RETRIES",
            value: "lots".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "invalid value \"lots\" for environment variable RETRY_MAX_RETRIES"
        );
    }
}
