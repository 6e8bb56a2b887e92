//! The retry loop and the trait that parameterizes it.

use super::state::{RetryState, Transition};
use crate::error::RetryError;
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// A strategy for re-running failed operations.
///
/// Implementations decide how many retries are allowed and how long to wait
/// before each one. The provided [`execute`](RetryStrategy::execute) and
/// [`execute_with_cancellation`](RetryStrategy::execute_with_cancellation)
/// methods drive a [`RetryState`] with those two numbers, so a strategy only
/// has to supply data.
///
/// The delay is the same for every retry. There is no exponential growth and
/// no jitter.
///
/// # Examples
///
/// ```rust
/// use bounded_retry::retry::{FixedDelay, RetryStrategy};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let strategy = FixedDelay::new(3, Duration::from_millis(100));
///
/// let value = strategy.execute(|| async {
///     Ok::<_, std::io::Error>(42)
/// }).await?;
/// assert_eq!(value, 42);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait RetryStrategy: Send + Sync {
    /// Number of retries allowed after the initial attempt.
    ///
    /// If `max_retries() == 3`, the operation is invoked at most 4 times.
    fn max_retries(&self) -> u32;

    /// Delay applied before every retry. Never applied before the first attempt.
    fn delay(&self) -> Duration;

    /// Run `operation` until it succeeds or the retry budget is spent.
    ///
    /// # Returns
    /// - `Ok(T)`: the value from the first successful attempt
    /// - `Err(RetryError::Exhausted)`: every attempt failed; carries the last failure
    async fn execute<F, Fut, T, E>(&self, operation: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = Result<T, E>> + Send,
        T: Send,
        E: Send,
    {
        run(self.max_retries(), self.delay(), operation, None).await
    }

    /// Like [`execute`](RetryStrategy::execute), but stops waiting as soon as
    /// `token` is cancelled.
    ///
    /// Cancellation is only observed between attempts. An attempt that is
    /// already running is awaited to completion, and the first attempt always
    /// runs.
    ///
    /// # Returns
    /// - `Err(RetryError::Cancelled)`: the token fired while waiting to retry
    async fn execute_with_cancellation<F, Fut, T, E>(
        &self,
        operation: F,
        token: &CancellationToken,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = Result<T, E>> + Send,
        T: Send,
        E: Send,
    {
        run(self.max_retries(), self.delay(), operation, Some(token)).await
    }
}

pub(crate) async fn run<F, Fut, T, E>(
    max_retries: u32,
    delay: Duration,
    mut operation: F,
    token: Option<&CancellationToken>,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut state = RetryState::new(max_retries, delay);

    loop {
        state.begin_attempt();
        tracing::debug!(
            attempt = state.attempts(),
            remaining_retries = state.remaining_retries(),
            "attempting operation"
        );

        let last_error = match operation().await {
            Ok(value) => {
                state.record_success();
                tracing::debug!(attempt = state.attempts(), "operation succeeded");
                return Ok(value);
            }
            Err(err) => err,
        };

        match state.record_failure() {
            Transition::GiveUp => {
                tracing::warn!(attempts = state.attempts(), "maximum retries exhausted");
                return Err(RetryError::Exhausted {
                    attempts: state.attempts(),
                    last_error,
                });
            }
            Transition::Retry(delay) => {
                tracing::debug!(
                    attempt = state.attempts(),
                    remaining_retries = state.remaining_retries(),
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    "attempt failed, retrying"
                );

                let Some(token) = token else {
                    pause(delay).await;
                    continue;
                };

                let cancelled = tokio::select! {
                    biased;
                    _ = token.cancelled() => true,
                    _ = pause(delay) => false,
                };

                if cancelled {
                    state.cancel();
                    tracing::debug!(attempts = state.attempts(), "retry cancelled while waiting");
                    return Err(RetryError::Cancelled {
                        attempts: state.attempts(),
                        last_error: Some(last_error),
                    });
                }
            }
        }
    }
}

/// Suspend before the next attempt. A zero delay still yields once.
async fn pause(delay: Duration) {
    if delay.is_zero() {
        tokio::task::yield_now().await;
    } else {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Strategy backed by plain fields, to exercise the provided methods.
    struct Fields {
        retries: u32,
        delay: Duration,
    }

    impl RetryStrategy for Fields {
        fn max_retries(&self) -> u32 {
            self.retries
        }

        fn delay(&self) -> Duration {
            self.delay
        }
    }

    #[tokio::test]
    async fn test_custom_strategy_uses_provided_loop() {
        let strategy = Fields {
            retries: 1,
            delay: Duration::from_millis(1),
        };
        let attempts = Arc::new(AtomicU32::new(0));

        let result = strategy
            .execute(|| {
                let attempts = Arc::clone(&attempts);
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err::<(), _>(io::Error::other("always fail"))
                }
            })
            .await;

        let err = result.unwrap_err();
        assert!(err.is_exhausted());
        assert_eq!(err.attempts(), 2);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_run_returns_last_error() {
        let mut calls = 0u32;

        let result = run(
            2,
            Duration::ZERO,
            || {
                calls += 1;
                let n = calls;
                async move { Err::<(), _>(format!("failure {}", n)) }
            },
            None,
        )
        .await;

        assert_eq!(result.unwrap_err().into_last_error().as_deref(), Some("failure 3"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_sleeps_for_delay() {
        let start = tokio::time::Instant::now();
        pause(Duration::from_millis(250)).await;

        assert!(start.elapsed() >= Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_zero_does_not_advance_clock() {
        let start = tokio::time::Instant::now();
        pause(Duration::ZERO).await;

        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
