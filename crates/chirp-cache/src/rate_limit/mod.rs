//! Per-user rate limiting backed by Redis.

mod sliding_window;

pub use sliding_window::{RedisRateLimiter, SlidingWindow, POST_RATE_LIMIT_PREFIX};
