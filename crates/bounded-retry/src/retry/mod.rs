//! Bounded retry execution.
//!
//! This module wraps a fallible async operation and re-invokes it up to a
//! fixed number of additional times, waiting a fixed delay before each retry.
//! The invocation settles with the first success or with
//! [`RetryError::Exhausted`] once the budget is spent.
//!
//! # Key Types
//!
//! - [`execute`] / [`execute_with_cancellation`] - one-shot entry points
//! - [`RetryStrategy`] - trait carrying the retry loop
//! - [`FixedDelay`] - the constant-delay strategy
//! - [`RetryState`] - the per-invocation state machine
//!
//! # Examples
//!
//! ```rust
//! use bounded_retry::retry;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let value = retry::execute(
//!     || async { Ok::<_, std::io::Error>(42) },
//!     3,
//!     Duration::from_millis(100),
//! )
//! .await?;
//! assert_eq!(value, 42);
//! # Ok(())
//! # }
//! ```

mod fixed;
mod state;
mod strategy;

pub use fixed::{FixedDelay, FixedDelayBuilder};
pub use state::{RetryPhase, RetryState, Transition};
pub use strategy::RetryStrategy;

use crate::error::RetryError;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Invoke `operation`, retrying up to `max_retries` more times with `delay`
/// between attempts.
///
/// `max_retries == 0` means exactly one attempt. A zero `delay` skips the
/// timer but still yields to the scheduler before each retry.
pub async fn execute<F, Fut, T, E>(
    operation: F,
    max_retries: u32,
    delay: Duration,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    strategy::run(max_retries, delay, operation, None).await
}

/// Same as [`execute`], but settles with [`RetryError::Cancelled`] if `token`
/// is cancelled while waiting between attempts.
pub async fn execute_with_cancellation<F, Fut, T, E>(
    operation: F,
    max_retries: u32,
    delay: Duration,
    token: &CancellationToken,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    strategy::run(max_retries, delay, operation, Some(token)).await
}
