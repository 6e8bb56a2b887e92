#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Bounded retry executor.
//!
//! Wraps a fallible async operation and re-invokes it up to a fixed number of
//! additional times, waiting a fixed delay between attempts. The invocation
//! resolves with the first success, or fails once the retry budget is used up.
//!
//! - **One-shot entry point** via [`retry::execute`]
//! - **Reusable strategies** via the [`RetryStrategy`](retry::RetryStrategy) trait
//!   and [`FixedDelay`](retry::FixedDelay)
//! - **Cancellation** between attempts via `tokio_util`'s `CancellationToken`
//! - **Configuration** from the environment, TOML or JSON via [`config::RetryConfig`]
//!
//! Attempts within one invocation never overlap. Each attempt is preceded by
//! a `tracing` DEBUG event carrying the remaining retry count.
//!
//! # Examples
//!
//! ```rust
//! use bounded_retry::prelude::*;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut failures_left = 2;
//!
//! let value = retry::execute(
//!     || {
//!         let fail = failures_left > 0;
//!         failures_left -= usize::from(fail);
//!         async move {
//!             if fail {
//!                 Err(std::io::Error::other("network error"))
//!             } else {
//!                 Ok(42)
//!             }
//!         }
//!     },
//!     3,
//!     Duration::from_millis(1),
//! )
//! .await?;
//!
//! assert_eq!(value, 42);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod retry;


/// Convenient re-exports of commonly used items.
///
/// ```rust
/// use bounded_retry::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::RetryConfig;
    pub use crate::error::{ConfigError, RetryError};
    pub use crate::retry::{self, FixedDelay, FixedDelayBuilder, RetryStrategy};
    pub use tokio_util::sync::CancellationToken;
}
