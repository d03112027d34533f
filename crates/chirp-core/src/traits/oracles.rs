//! External oracle ports: identity lookup and rate limiting

use std::time::Duration;

use async_trait::async_trait;

use crate::entities::AuthorProfile;
use crate::traits::RepoResult;
use crate::value_objects::UserId;

/// Maximum number of user ids per identity lookup
pub const MAX_LOOKUP_BATCH: usize = 100;

// ============================================================================
// Identity Provider
// ============================================================================

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Look up profiles for up to [`MAX_LOOKUP_BATCH`] user ids.
    ///
    /// Unknown ids are simply absent from the result.
    async fn lookup_users(&self, ids: &[UserId]) -> RepoResult<Vec<AuthorProfile>>;
}

// ============================================================================
// Rate Limiter
// ============================================================================

/// Outcome of a rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Operations permitted per window
    pub limit: u32,
    /// Operations left in the current window after this one
    pub remaining: u32,
    /// When a denied caller may try again
    pub retry_after: Option<Duration>,
}

impl RateLimitDecision {
    pub fn allow(limit: u32, remaining: u32) -> Self {
        Self {
            allowed: true,
            limit,
            remaining,
            retry_after: None,
        }
    }

    pub fn deny(limit: u32, retry_after: Option<Duration>) -> Self {
        Self {
            allowed: false,
            limit,
            remaining: 0,
            retry_after,
        }
    }
}

#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Atomically check the window for `key` and, if allowed, record the operation
    async fn check_and_consume(&self, key: &str) -> RepoResult<RateLimitDecision>;
}
