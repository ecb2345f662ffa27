//! Retry with exponential backoff
//!
//! Only errors that `LedgerError::is_retryable` accepts (transport failures
//! and 5xx responses) are retried. Validation and other 4xx errors, 429
//! included, fail on the first attempt.

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::RetrySettings;
use crate::error::LedgerResult;

/// Blocks the calling thread between attempts
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total invocations, including the first
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    /// Double the delay after every failed attempt
    pub exponential: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_settings(&RetrySettings::default())
    }
}

impl RetryPolicy {
    pub fn from_settings(settings: &RetrySettings) -> Self {
        Self {
            max_attempts: settings.max_attempts.max(1),
            base_delay: Duration::from_millis(settings.base_delay_ms),
            max_delay: Duration::from_millis(settings.max_delay_ms),
            exponential: true,
        }
    }

    /// A single attempt, no retries
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            exponential: false,
        }
    }

    /// Delay to wait after failed attempt number `attempt` (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        if !self.exponential {
            return self.base_delay.min(self.max_delay);
        }
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    /// Run `operation` until it succeeds, fails with a non-retryable error,
    /// or the attempts run out. The last error is returned unchanged.
    pub fn execute<T, F>(&self, sleeper: &dyn Sleeper, label: &str, mut operation: F) -> LedgerResult<T>
    where
        F: FnMut() -> LedgerResult<T>,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match operation() {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(operation = label, attempt, "succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) if attempt >= self.max_attempts => {
                    warn!(operation = label, attempts = attempt, error = %e, "giving up after retries");
                    return Err(e);
                }
                Err(e) => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        operation = label,
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "request failed, retrying"
                    );
                    sleeper.sleep(delay);
                }
            }
        }
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Records requested delays instead of sleeping
    #[derive(Default)]
    pub struct RecordingSleeper {
        delays: Mutex<Vec<Duration>>,
    }

    impl RecordingSleeper {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn delays(&self) -> Vec<Duration> {
            self.delays.lock().unwrap().clone()
        }
    }

    impl Sleeper for RecordingSleeper {
        fn sleep(&self, duration: Duration) {
            self.delays.lock().unwrap().push(duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingSleeper;
    use super::*;
    use crate::error::LedgerError;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_delay_doubles_and_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(1), ms(1000));
        assert_eq!(policy.delay_for(2), ms(2000));
        assert_eq!(policy.delay_for(3), ms(4000));
        assert_eq!(policy.delay_for(5), ms(10_000));
        assert_eq!(policy.delay_for(40), ms(10_000));
    }

    #[test]
    fn test_retries_network_errors_up_to_max_attempts() {
        let sleeper = RecordingSleeper::new();
        let mut calls = 0;
        let result: LedgerResult<()> = RetryPolicy::default().execute(&sleeper, "test", || {
            calls += 1;
            Err(LedgerError::Network("refused".into()))
        });

        assert!(matches!(result, Err(LedgerError::Network(_))));
        assert_eq!(calls, 3);
        assert_eq!(sleeper.delays(), vec![ms(1000), ms(2000)]);
    }

    #[test]
    fn test_succeeds_after_server_error() {
        let sleeper = RecordingSleeper::new();
        let mut calls = 0;
        let result = RetryPolicy::default().execute(&sleeper, "test", || {
            calls += 1;
            if calls == 1 {
                Err(LedgerError::from_status(502, "bad gateway"))
            } else {
                Ok(42)
            }
        });

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_client_errors_are_not_retried() {
        for status in [400u16, 401, 404, 429] {
            let sleeper = RecordingSleeper::new();
            let mut calls = 0;
            let result: LedgerResult<()> = RetryPolicy::default().execute(&sleeper, "test", || {
                calls += 1;
                Err(LedgerError::from_status(status, "nope"))
            });
            assert!(result.is_err());
            assert_eq!(calls, 1, "status {} was retried", status);
            assert!(sleeper.delays().is_empty());
        }
    }

    #[test]
    fn test_none_policy_tries_once() {
        let sleeper = RecordingSleeper::new();
        let mut calls = 0;
        let _: LedgerResult<()> = RetryPolicy::none().execute(&sleeper, "test", || {
            calls += 1;
            Err(LedgerError::Network("down".into()))
        });
        assert_eq!(calls, 1);
    }
}
