//! Per-invocation retry bookkeeping.

use std::time::Duration;

/// Phase of a single retry invocation.
///
/// ```text
/// Idle ──begin_attempt──▶ Attempting ──record_success──▶ Succeeded
///                           │    ▲
///          record_failure   │    │ begin_attempt
///          (retries left)   ▼    │
///                          Waiting ──cancel──▶ Failed
///
/// Attempting ──record_failure (no retries left)──▶ Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryPhase {
    /// Created, no attempt started yet.
    Idle,
    /// The operation is being awaited.
    Attempting,
    /// Sleeping before the next attempt.
    Waiting,
    /// An attempt succeeded. Terminal.
    Succeeded,
    /// Retries were exhausted or the wait was cancelled. Terminal.
    Failed,
}

impl RetryPhase {
    /// Whether no further transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, RetryPhase::Succeeded | RetryPhase::Failed)
    }
}

/// What the executor should do after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Wait for the given delay, then attempt again.
    Retry(Duration),
    /// The budget is spent; settle with a terminal failure.
    GiveUp,
}

/// State owned by exactly one in-flight invocation.
///
/// Transitions requested from the wrong phase are logic errors. They trip a
/// `debug_assert!` and otherwise leave the state untouched.
#[derive(Debug, Clone)]
pub struct RetryState {
    remaining_retries: u32,
    delay: Duration,
    attempts: u32,
    phase: RetryPhase,
}

impl RetryState {
    /// Fresh state for an invocation allowed `max_retries` retries.
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self {
            remaining_retries: max_retries,
            delay,
            attempts: 0,
            phase: RetryPhase::Idle,
        }
    }

    /// Retries still available.
    pub fn remaining_retries(&self) -> u32 {
        self.remaining_retries
    }

    /// Delay applied before each retry.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Attempts started so far. Saturates at `u32::MAX`.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Current phase.
    pub fn phase(&self) -> RetryPhase {
        self.phase
    }

    /// Idle | Waiting -> Attempting.
    pub fn begin_attempt(&mut self) {
        if !self.expect_phase(&[RetryPhase::Idle, RetryPhase::Waiting]) {
            return;
        }
        self.attempts = self.attempts.saturating_add(1);
        self.phase = RetryPhase::Attempting;
    }

    /// Attempting -> Succeeded.
    pub fn record_success(&mut self) {
        if self.expect_phase(&[RetryPhase::Attempting]) {
            self.phase = RetryPhase::Succeeded;
        }
    }

    /// Attempting -> Waiting (consuming one retry) or Attempting -> Failed.
    ///
    /// Called from any other phase this reports [`Transition::GiveUp`]
    /// without changing anything.
    pub fn record_failure(&mut self) -> Transition {
        if !self.expect_phase(&[RetryPhase::Attempting]) {
            return Transition::GiveUp;
        }

        if self.remaining_retries == 0 {
            self.phase = RetryPhase::Failed;
            Transition::GiveUp
        } else {
            self.remaining_retries -= 1;
            self.phase = RetryPhase::Waiting;
            Transition::Retry(self.delay)
        }
    }

    /// Waiting -> Failed.
    pub fn cancel(&mut self) {
        if self.expect_phase(&[RetryPhase::Waiting]) {
            self.phase = RetryPhase::Failed;
        }
    }

    fn expect_phase(&self, allowed: &[RetryPhase]) -> bool {
        let ok = allowed.contains(&self.phase);
        debug_assert!(
            ok,
            "invalid retry transition from {:?} (expected one of {:?})",
            self.phase, allowed
        );
        ok
    }
}
