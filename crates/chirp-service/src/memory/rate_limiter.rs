//! In-memory sliding-window rate limiter

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use chirp_core::traits::{RateLimitDecision, RateLimiter, RepoResult};

/// Sliding-window limiter keeping per-key timestamps in process memory.
///
/// Same policy as the Redis limiter: entries older than the window are
/// dropped, a full window denies without recording the attempt.
#[derive(Debug)]
pub struct InMemoryRateLimiter {
    limit: u32,
    window: Duration,
    windows: DashMap<String, VecDeque<Instant>>,
    calls: AtomicUsize,
}

impl InMemoryRateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            windows: DashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Three posts per sixty seconds
    pub fn posts_default() -> Self {
        Self::new(3, Duration::from_secs(60))
    }

    /// Number of `check_and_consume` calls
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Check and consume at an explicit instant
    pub fn check_at(&self, key: &str, now: Instant) -> RateLimitDecision {
        self.calls.fetch_add(1, Ordering::SeqCst);

        // the entry guard serializes callers sharing a key
        let mut entry = self.windows.entry(key.to_string()).or_default();
        let stamps = entry.value_mut();

        while stamps
            .front()
            .is_some_and(|oldest| now.saturating_duration_since(*oldest) >= self.window)
        {
            stamps.pop_front();
        }

        let used = u32::try_from(stamps.len()).unwrap_or(u32::MAX);
        if used >= self.limit {
            let retry_after = stamps
                .front()
                .map_or(self.window, |oldest| {
                    self.window.saturating_sub(now.saturating_duration_since(*oldest))
                });
            return RateLimitDecision::deny(self.limit, Some(retry_after));
        }

        stamps.push_back(now);
        RateLimitDecision::allow(self.limit, self.limit - used - 1)
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check_and_consume(&self, key: &str) -> RepoResult<RateLimitDecision> {
        Ok(self.check_at(key, Instant::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fourth_call_in_window_denied() {
        let limiter = InMemoryRateLimiter::posts_default();
        let start = Instant::now();

        for remaining in [2, 1, 0] {
            let decision = limiter.check_at("user_1", start);
            assert!(decision.allowed);
            assert_eq!(decision.remaining, remaining);
        }

        let denied = limiter.check_at("user_1", start + Duration::from_secs(59));
        assert!(!denied.allowed);
        assert_eq!(denied.retry_after, Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_window_slides() {
        let limiter = InMemoryRateLimiter::new(3, Duration::from_secs(60));
        let start = Instant::now();

        limiter.check_at("user_1", start);
        limiter.check_at("user_1", start + Duration::from_secs(10));
        limiter.check_at("user_1", start + Duration::from_secs(20));

        assert!(!limiter.check_at("user_1", start + Duration::from_secs(30)).allowed);
        // the first entry has aged out
        assert!(limiter.check_at("user_1", start + Duration::from_secs(60)).allowed);
        assert!(!limiter.check_at("user_1", start + Duration::from_secs(61)).allowed);
    }

    #[test]
    fn test_denials_are_not_recorded() {
        let limiter = InMemoryRateLimiter::new(1, Duration::from_secs(60));
        let start = Instant::now();

        assert!(limiter.check_at("user_1", start).allowed);
        for i in 1..10 {
            assert!(!limiter.check_at("user_1", start + Duration::from_secs(i)).allowed);
        }
        assert!(limiter.check_at("user_1", start + Duration::from_secs(60)).allowed);
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = InMemoryRateLimiter::new(1, Duration::from_secs(60));
        let now = Instant::now();

        assert!(limiter.check_at("user_1", now).allowed);
        assert!(limiter.check_at("user_2", now).allowed);
        assert!(!limiter.check_at("user_1", now).allowed);
    }

    #[test]
    fn test_zero_limit_denies() {
        let limiter = InMemoryRateLimiter::new(0, Duration::from_secs(60));
        assert!(!limiter.check_at("user_1", Instant::now()).allowed);
    }
}
