//! Fixed-delay retry strategy.

use super::strategy::RetryStrategy;
use crate::config::{DEFAULT_DELAY, DEFAULT_MAX_RETRIES};
use std::time::Duration;

/// Retry up to `max_retries` times, waiting the same `delay` before each retry.
///
/// # Examples
///
/// ```rust
/// use bounded_retry::retry::{FixedDelay, RetryStrategy};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Default configuration (max_retries=3, delay=1s)
/// let strategy = FixedDelay::default();
///
/// // Custom configuration
/// let strategy = FixedDelay::builder()
///     .max_retries(5)
///     .delay(Duration::from_millis(100))
///     .build();
///
/// let result = strategy.execute(|| async {
///     // Your operation here
///     Ok::<_, std::io::Error>(42)
/// }).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    max_retries: u32,
    delay: Duration,
}

impl FixedDelay {
    /// Create a strategy from explicit values.
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// Create a new builder for configuring a fixed-delay strategy.
    pub fn builder() -> FixedDelayBuilder {
        FixedDelayBuilder::default()
    }
}

impl Default for FixedDelay {
    /// Defaults:
    /// - `max_retries`: 3
    /// - `delay`: 1s
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES, DEFAULT_DELAY)
    }
}

impl RetryStrategy for FixedDelay {
    fn max_retries(&self) -> u32 {
        self.max_retries
    }

    fn delay(&self) -> Duration {
        self.delay
    }
}

/// Builder for configuring [`FixedDelay`].
///
/// Unset parameters fall back to the defaults.
#[derive(Debug, Default)]
pub struct FixedDelayBuilder {
    max_retries: Option<u32>,
    delay: Option<Duration>,
}

impl FixedDelayBuilder {
    /// Set the number of retries after the initial attempt.
    ///
    /// Default: 3
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Set the delay applied before every retry.
    ///
    /// Default: 1s
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Build the `FixedDelay` instance.
    pub fn build(self) -> FixedDelay {
        FixedDelay {
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            delay: self.delay.unwrap_or(DEFAULT_DELAY),
        }
    }
}
