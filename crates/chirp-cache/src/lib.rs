//! # chirp-cache
//!
//! Redis layer: a managed connection pool and the per-user post rate limiter.
//!
//! ## Example
//!
//! ```ignore
//! use chirp_cache::{RedisPool, RedisPoolConfig, RedisRateLimiter, SlidingWindow};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let limiter = RedisRateLimiter::new(pool, SlidingWindow::posts(3, Duration::from_secs(60)));
//!
//! let decision = limiter.check_and_consume("user_2abc").await?;
//! ```

pub mod pool;
pub mod rate_limit;

// Re-export pool types
pub use pool::{
    create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool,
};

// Re-export rate limiter types
pub use rate_limit::{RedisRateLimiter, SlidingWindow, POST_RATE_LIMIT_PREFIX};
