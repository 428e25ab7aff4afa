//! Retry arithmetic decoupled from the blocking primitive.
//!
//! `RetryPolicy` owns the attempt counter and delay computation; the
//! `Sleeper` seam lets callers choose blocking sleep, timers, or scheduled
//! re-enqueue without changing the arithmetic.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Marks errors that may succeed on a later attempt.
/// Permanent/validation errors must report `false` and are never retried.
pub trait Transient {
    fn is_transient(&self) -> bool;
}

/// Where retries wait: blocking sleep in production, recording no-op in tests.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

/// Blocking sleeper for synchronous callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Bounded exponential backoff: `base_delay_secs * 2^attempt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay_secs: u64,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay_secs: u64) -> Self {
        Self {
            max_attempts,
            base_delay_secs,
        }
    }

    /// Delay to wait after the given zero-based failed attempt.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt);
        Duration::from_secs(self.base_delay_secs.saturating_mul(factor))
    }

    /// Run `op` up to `max_attempts` times, sleeping between attempts.
    ///
    /// Only transient errors are retried; permanent errors propagate
    /// immediately. The final transient error is returned once attempts are
    /// exhausted.
    pub fn run<T, E, F>(&self, sleeper: &dyn Sleeper, what: &str, mut op: F) -> Result<T, E>
    where
        E: Transient + fmt::Display,
        F: FnMut() -> Result<T, E>,
    {
        let mut attempt = 0u32;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt + 1 < self.max_attempts => {
                    let delay = self.delay_after(attempt);
                    tracing::warn!(
                        what,
                        attempt = attempt + 1,
                        max_attempts = self.max_attempts,
                        delay_secs = delay.as_secs(),
                        "transient failure, retrying: {e}"
                    );
                    sleeper.sleep(delay);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("{reason}")]
    struct TestError {
        reason: &'static str,
        transient: bool,
    }

    impl Transient for TestError {
        fn is_transient(&self) -> bool {
            self.transient
        }
    }

    #[derive(Default)]
    struct RecordingSleeper {
        delays: Mutex<Vec<Duration>>,
    }

    impl Sleeper for RecordingSleeper {
        fn sleep(&self, duration: Duration) {
            self.delays.lock().unwrap().push(duration);
        }
    }

    #[test]
    fn delays_double_per_attempt() {
        let policy = RetryPolicy::new(3, 2);
        assert_eq!(policy.delay_after(0), Duration::from_secs(2));
        assert_eq!(policy.delay_after(1), Duration::from_secs(4));
        assert_eq!(policy.delay_after(2), Duration::from_secs(8));
    }

    #[test]
    fn retries_transient_until_success() {
        let policy = RetryPolicy::new(3, 1);
        let sleeper = RecordingSleeper::default();
        let mut calls = 0;
        let result: Result<u32, TestError> = policy.run(&sleeper, "test", || {
            calls += 1;
            if calls < 3 {
                Err(TestError {
                    reason: "timeout",
                    transient: true,
                })
            } else {
                Ok(42)
            }
        });
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls, 3);
        assert_eq!(
            *sleeper.delays.lock().unwrap(),
            vec![Duration::from_secs(1), Duration::from_secs(2)]
        );
    }

    #[test]
    fn permanent_errors_are_not_retried() {
        let policy = RetryPolicy::new(3, 1);
        let sleeper = RecordingSleeper::default();
        let mut calls = 0;
        let result: Result<u32, TestError> = policy.run(&sleeper, "test", || {
            calls += 1;
            Err(TestError {
                reason: "malformed query",
                transient: false,
            })
        });
        assert!(result.is_err());
        assert_eq!(calls, 1);
        assert!(sleeper.delays.lock().unwrap().is_empty());
    }

    #[test]
    fn transient_errors_exhaust_after_max_attempts() {
        let policy = RetryPolicy::new(3, 1);
        let sleeper = RecordingSleeper::default();
        let mut calls = 0;
        let result: Result<u32, TestError> = policy.run(&sleeper, "test", || {
            calls += 1;
            Err(TestError {
                reason: "rate limited",
                transient: true,
            })
        });
        assert!(result.is_err());
        assert_eq!(calls, 3);
        assert_eq!(sleeper.delays.lock().unwrap().len(), 2);
    }
}
