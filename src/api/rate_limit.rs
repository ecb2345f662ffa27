//! Client-side rate limiting
//!
//! One `governor` limiter per operation key, each allowing `max_requests`
//! per `window` with the full quota available as a burst. State lives for
//! the lifetime of the process.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use governor::clock::{Clock, DefaultClock};
use governor::state::{InMemoryState, NotKeyed};
use governor::Quota;

use crate::config::RateLimitSettings;
use crate::error::{LedgerError, LedgerResult};

type DirectLimiter = governor::RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

pub struct RateLimiter {
    quota: Quota,
    limiters: DashMap<String, Arc<DirectLimiter>>,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        let burst = u32::try_from(max_requests)
            .ok()
            .and_then(NonZeroU32::new)
            .unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(window / burst.get())
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst);
        Self {
            quota,
            limiters: DashMap::new(),
        }
    }

    pub fn from_settings(settings: &RateLimitSettings) -> Self {
        Self::new(settings.max_requests, Duration::from_secs(settings.window_secs))
    }

    fn limiter_for(&self, key: &str) -> Arc<DirectLimiter> {
        if let Some(limiter) = self.limiters.get(key) {
            return limiter.value().clone();
        }
        self.limiters
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(DirectLimiter::direct(self.quota)))
            .value()
            .clone()
    }

    /// Admit a request for `key`, consuming one cell when allowed
    pub fn is_allowed(&self, key: &str) -> bool {
        self.limiter_for(key).check().is_ok()
    }

    /// Like `is_allowed`, but fails with `LedgerError::RateLimited`
    pub fn check(&self, key: &str) -> LedgerResult<()> {
        self.limiter_for(key).check().map_err(|not_until| {
            let wait = not_until.wait_time_from(DefaultClock::default().now());
            LedgerError::RateLimited {
                key: key.to_string(),
                retry_after_secs: wait.as_secs().max(1),
            }
        })
    }

    /// Forget every key's history
    pub fn reset(&self) {
        self.limiters.clear();
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::from_settings(&RateLimitSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admits_exactly_max_requests_at_once() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        for _ in 0..3 {
            assert!(limiter.is_allowed("k"));
        }
        assert!(!limiter.is_allowed("k"));
        assert!(!limiter.is_allowed("k"));
    }

    #[test]
    fn test_default_allows_thirty_per_minute() {
        let limiter = RateLimiter::default();
        for _ in 0..30 {
            assert!(limiter.check("trial-balance:generate").is_ok());
        }
        assert!(limiter.check("trial-balance:generate").is_err());
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        assert!(limiter.is_allowed("trial-balance:generate"));
        assert!(!limiter.is_allowed("trial-balance:generate"));
        assert!(limiter.is_allowed("trial-balance:compare"));
    }

    #[test]
    fn test_check_reports_retry_after() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        limiter.check("k").unwrap();

        match limiter.check("k") {
            Err(LedgerError::RateLimited { key, retry_after_secs }) => {
                assert_eq!(key, "k");
                assert!((1..=60).contains(&retry_after_secs));
            }
            other => panic!("expected rate limit, got {:?}", other),
        }

        limiter.reset();
        assert!(limiter.check("k").is_ok());
    }

    #[test]
    fn test_capacity_replenishes() {
        let limiter = RateLimiter::new(1, Duration::from_millis(50));
        assert!(limiter.is_allowed("k"));
        assert!(!limiter.is_allowed("k"));
        std::thread::sleep(Duration::from_millis(80));
        assert!(limiter.is_allowed("k"));
    }

    #[test]
    fn test_zero_settings_still_admit_one() {
        let limiter = RateLimiter::new(0, Duration::ZERO);
        assert!(limiter.is_allowed("k"));
    }
}
