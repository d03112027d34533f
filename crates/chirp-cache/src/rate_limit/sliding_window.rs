//! Sliding-window rate limiter stored in Redis sorted sets.
//!
//! Each key holds one member per recorded operation, scored by its timestamp
//! in milliseconds. A Lua script trims expired members, counts the rest and
//! records the new attempt in one atomic step, so concurrent requests from
//! several server instances cannot overshoot the limit.

use std::sync::LazyLock;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use redis::Script;
use tracing::{debug, instrument};
use uuid::Uuid;

use chirp_core::traits::{RateLimitDecision, RateLimiter, RepoResult};

use crate::pool::{RedisPool, RedisPoolError, RedisResult};

/// Key prefix for post creation windows
pub const POST_RATE_LIMIT_PREFIX: &str = "ratelimit:posts:";

/// KEYS[1] window key
/// ARGV[1] now (ms), ARGV[2] window (ms), ARGV[3] limit, ARGV[4] member
///
/// Returns `{allowed, remaining, retry_after_ms}`. Denied attempts are not recorded.
const SLIDING_WINDOW_LUA: &str = r"
local key = KEYS[1]
local now = tonumber(ARGV[1])
local window = tonumber(ARGV[2])
local limit = tonumber(ARGV[3])

redis.call('ZREMRANGEBYSCORE', key, '-inf', now - window)
local count = redis.call('ZCARD', key)

if count >= limit then
    local retry = window
    local oldest = redis.call('ZRANGE', key, 0, 0, 'WITHSCORES')
    if oldest[2] then
        retry = tonumber(oldest[2]) + window - now
    end
    return {0, 0, retry}
end

redis.call('ZADD', key, now, ARGV[4])
redis.call('PEXPIRE', key, window)
return {1, limit - count - 1, 0}
";

static SLIDING_WINDOW_SCRIPT: LazyLock<Script> = LazyLock::new(|| Script::new(SLIDING_WINDOW_LUA));

/// Window parameters for one class of operations
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    /// Key prefix; the caller key is appended
    pub prefix: String,
    /// Operations permitted per window
    pub limit: u32,
    pub window: Duration,
}

impl SlidingWindow {
    /// Window for post creation, keyed by user id
    #[must_use]
    pub fn posts(limit: u32, window: Duration) -> Self {
        Self {
            prefix: POST_RATE_LIMIT_PREFIX.to_string(),
            limit,
            window,
        }
    }

    fn key(&self, identifier: &str) -> String {
        format!("{}{identifier}", self.prefix)
    }

    fn window_ms(&self) -> i64 {
        i64::try_from(self.window.as_millis()).unwrap_or(i64::MAX)
    }
}

impl From<&chirp_common::PostRateLimitConfig> for SlidingWindow {
    fn from(config: &chirp_common::PostRateLimitConfig) -> Self {
        Self::posts(config.max_requests, config.window())
    }
}

/// Redis-backed implementation of [`RateLimiter`]
#[derive(Debug, Clone)]
pub struct RedisRateLimiter {
    pool: RedisPool,
    window: SlidingWindow,
}

impl RedisRateLimiter {
    #[must_use]
    pub fn new(pool: RedisPool, window: SlidingWindow) -> Self {
        Self { pool, window }
    }

    async fn run_script(&self, key: &str) -> RedisResult<Vec<i64>> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or_default();

        let mut conn = self.pool.get().await?;
        let reply: Vec<i64> = SLIDING_WINDOW_SCRIPT
            .key(key)
            .arg(now)
            .arg(self.window.window_ms())
            .arg(self.window.limit)
            .arg(Uuid::new_v4().to_string())
            .invoke_async(&mut conn)
            .await?;
        Ok(reply)
    }
}

/// Interpret the `{allowed, remaining, retry_after_ms}` script reply
fn decision_from_reply(reply: &[i64], limit: u32) -> RedisResult<RateLimitDecision> {
    match *reply {
        [1, remaining, _] => Ok(RateLimitDecision::allow(
            limit,
            u32::try_from(remaining).unwrap_or(0),
        )),
        [0, _, retry_ms] => Ok(RateLimitDecision::deny(
            limit,
            Some(Duration::from_millis(u64::try_from(retry_ms).unwrap_or(0))),
        )),
        _ => Err(RedisPoolError::UnexpectedReply(format!("{reply:?}"))),
    }
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    #[instrument(skip(self))]
    async fn check_and_consume(&self, key: &str) -> RepoResult<RateLimitDecision> {
        // an empty window admits nothing
        if self.window.limit == 0 {
            return Ok(RateLimitDecision::deny(0, Some(self.window.window)));
        }

        let redis_key = self.window.key(key);
        let reply = self.run_script(&redis_key).await?;
        let decision = decision_from_reply(&reply, self.window.limit)?;

        debug!(
            allowed = decision.allowed,
            remaining = decision.remaining,
            "Rate limit checked"
        );
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::RedisPoolConfig;

    #[test]
    fn test_post_key() {
        let window = SlidingWindow::posts(3, Duration::from_secs(60));
        assert_eq!(window.key("user_1"), "ratelimit:posts:user_1");
        assert_eq!(window.window_ms(), 60_000);
    }

    #[test]
    fn test_window_from_config() {
        let window = SlidingWindow::from(&chirp_common::PostRateLimitConfig::default());
        assert_eq!(window.limit, 3);
        assert_eq!(window.window, Duration::from_secs(60));
    }

    #[test]
    fn test_allowed_reply() {
        let decision = decision_from_reply(&[1, 2, 0], 3).unwrap();
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 2);
        assert!(decision.retry_after.is_none());
    }

    #[test]
    fn test_denied_reply() {
        let decision = decision_from_reply(&[0, 0, 1500], 3).unwrap();
        assert!(!decision.allowed);
        assert_eq!(decision.remaining, 0);
        assert_eq!(decision.retry_after, Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_malformed_reply() {
        assert!(matches!(
            decision_from_reply(&[1], 3),
            Err(RedisPoolError::UnexpectedReply(_))
        ));
    }

    #[test]
    fn test_script_trims_before_counting() {
        let trim = SLIDING_WINDOW_LUA.find("ZREMRANGEBYSCORE").unwrap();
        let count = SLIDING_WINDOW_LUA.find("ZCARD").unwrap();
        let add = SLIDING_WINDOW_LUA.find("ZADD").unwrap();
        assert!(trim < count && count < add);
    }

    /// Runs against a live Redis when `REDIS_URL` is set
    #[tokio::test]
    async fn test_limit_against_redis() {
        let Ok(url) = std::env::var("REDIS_URL") else {
            eprintln!("Skipping test: REDIS_URL not set");
            return;
        };
        let pool = RedisPool::new(RedisPoolConfig { url, max_connections: 2 }).unwrap();
        let limiter = RedisRateLimiter::new(pool, SlidingWindow::posts(3, Duration::from_secs(60)));
        let user = format!("test_{}", Uuid::new_v4());

        for expected_remaining in [2, 1, 0] {
            let decision = limiter.check_and_consume(&user).await.unwrap();
            assert!(decision.allowed);
            assert_eq!(decision.remaining, expected_remaining);
        }

        let denied = limiter.check_and_consume(&user).await.unwrap();
        assert!(!denied.allowed);
        assert!(denied.retry_after.unwrap() <= Duration::from_secs(60));

        let other = limiter.check_and_consume(&format!("{user}_other")).await.unwrap();
        assert!(other.allowed);
    }
}
