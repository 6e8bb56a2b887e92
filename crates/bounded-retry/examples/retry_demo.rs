//! Example: bounded retry with a fixed delay
//!
//! This example demonstrates:
//! 1. An operation that fails twice with "network error" and then succeeds
//! 2. An operation that always times out and exhausts its retries
//! 3. Cancelling an invocation while it waits between attempts
//!
//! Run with:
//! ```bash
//! RUST_LOG=bounded_retry=debug cargo run -p bounded-retry --example retry_demo
//! ```

use bounded_retry::prelude::*;
use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// A simulated service that fails the first few calls
struct UnreliableService {
    attempts: Arc<AtomicU32>,
    fail_count: u32,
    reason: &'static str,
}

impl UnreliableService {
    fn new(fail_count: u32, reason: &'static str) -> Self {
        Self {
            attempts: Arc::new(AtomicU32::new(0)),
            fail_count,
            reason,
        }
    }

    async fn call(&self) -> Result<u32, std::io::Error> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);

        if attempt < self.fail_count {
            println!("  Attempt {}: FAILED ({})", attempt + 1, self.reason);
            Err(std::io::Error::other(self.reason))
        } else {
            println!("  Attempt {}: SUCCESS", attempt + 1);
            Ok(42)
        }
    }

    fn total_attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

/// Example 1: two network errors, then success
async fn example_eventual_success() -> Result<(), Box<dyn Error>> {
    println!("\n=== Example 1: Eventual Success ===\n");

    let service = UnreliableService::new(2, "network error");
    let start = Instant::now();

    let value = retry::execute(|| service.call(), 3, Duration::from_millis(100)).await?;

    println!("\nResult: {}", value);
    println!("Total attempts: {}", service.total_attempts());
    println!("Total time: {:?} (expected ~200ms)", start.elapsed());

    Ok(())
}

/// Example 2: every attempt times out
async fn example_exhausted() {
    println!("\n=== Example 2: Retries Exhausted ===\n");

    let service = UnreliableService::new(u32::MAX, "timeout");
    let strategy = FixedDelay::builder()
        .max_retries(2)
        .delay(Duration::from_millis(50))
        .build();

    match strategy.execute(|| service.call()).await {
        Ok(value) => println!("\nUnexpected success: {}", value),
        Err(err) => {
            println!("\nError: {}", err);
            println!("Total attempts: {}", service.total_attempts());
        }
    }
}

/// Example 3: cancel during the wait
async fn example_cancelled() {
    println!("\n=== Example 3: Cancelled While Waiting ===\n");

    let service = UnreliableService::new(u32::MAX, "connection refused");
    let token = CancellationToken::new();

    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(250)).await;
        println!("  Cancelling...");
        canceller.cancel();
    });

    let result =
        retry::execute_with_cancellation(|| service.call(), 10, Duration::from_millis(100), &token)
            .await;

    match result {
        Err(err) if err.is_cancelled() => {
            println!("\n{} (last error: {:?})", err, err.last_error())
        }
        other => println!("\nUnexpected outcome: {:?}", other),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = RetryConfig::from_env()?;
    println!("Retry config from environment: {:?}", config);

    example_eventual_success().await?;
    example_exhausted().await;
    example_cancelled().await;

    Ok(())
}
