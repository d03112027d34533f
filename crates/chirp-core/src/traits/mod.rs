//! Port traits implemented by infrastructure adapters

mod oracles;
mod repositories;

pub use oracles::{IdentityProvider, RateLimitDecision, RateLimiter, MAX_LOOKUP_BATCH};
pub use repositories::{PostQuery, PostRepository, RepoResult, MAX_POSTS_PER_QUERY};
