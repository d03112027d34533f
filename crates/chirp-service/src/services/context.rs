//! Service context - dependency container for services
//!
//! Holds the post store, the identity and rate limit oracles, and the
//! infrastructure pools used for readiness checks.

use std::sync::Arc;

use chirp_cache::SharedRedisPool;
use chirp_core::traits::{IdentityProvider, PostRepository, RateLimiter};
use chirp_db::PgPool;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// The ports are trait objects so production adapters and in-memory fakes
/// are interchangeable. Pools are optional; without them readiness reports
/// the corresponding check as disabled.
#[derive(Clone)]
pub struct ServiceContext {
    // Infrastructure
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,

    // Ports
    post_repo: Arc<dyn PostRepository>,
    identity: Arc<dyn IdentityProvider>,
    rate_limiter: Arc<dyn RateLimiter>,
}

impl ServiceContext {
    /// Create a new service context from its ports
    pub fn new(
        post_repo: Arc<dyn PostRepository>,
        identity: Arc<dyn IdentityProvider>,
        rate_limiter: Arc<dyn RateLimiter>,
    ) -> Self {
        Self {
            pool: None,
            redis_pool: None,
            post_repo,
            identity,
            rate_limiter,
        }
    }

    // === Infrastructure ===

    /// Get the PostgreSQL connection pool, if configured
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Get the Redis connection pool, if configured
    pub fn redis_pool(&self) -> Option<&SharedRedisPool> {
        self.redis_pool.as_ref()
    }

    // === Ports ===

    /// Get the post repository
    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    /// Get the identity provider
    pub fn identity(&self) -> &dyn IdentityProvider {
        self.identity.as_ref()
    }

    /// Get the post rate limiter
    pub fn rate_limiter(&self) -> &dyn RateLimiter {
        self.rate_limiter.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("redis_pool", &self.redis_pool.as_ref().map(|_| "SharedRedisPool"))
            .field("ports", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,
    post_repo: Option<Arc<dyn PostRepository>>,
    identity: Option<Arc<dyn IdentityProvider>>,
    rate_limiter: Option<Arc<dyn RateLimiter>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: SharedRedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn rate_limiter(mut self, limiter: Arc<dyn RateLimiter>) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if any port is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let mut ctx = ServiceContext::new(
            self.post_repo
                .ok_or_else(|| ServiceError::internal("post_repo is required"))?,
            self.identity
                .ok_or_else(|| ServiceError::internal("identity is required"))?,
            self.rate_limiter
                .ok_or_else(|| ServiceError::internal("rate_limiter is required"))?,
        );
        ctx.pool = self.pool;
        ctx.redis_pool = self.redis_pool;
        Ok(ctx)
    }
}
