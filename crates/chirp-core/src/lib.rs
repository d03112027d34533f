//! # chirp-core
//!
//! Domain layer containing entities, value objects, the post content grammar,
//! and the port traits implemented by infrastructure adapters.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Author, AuthorProfile, EnrichedPost, Post};
pub use error::DomainError;
pub use traits::{
    IdentityProvider, PostQuery, PostRepository, RateLimitDecision, RateLimiter, RepoResult,
    MAX_LOOKUP_BATCH, MAX_POSTS_PER_QUERY,
};
pub use value_objects::{
    content_length, content_violations, is_emoji_only, ContentError, PostContent, Snowflake,
    SnowflakeGenerator, SnowflakeParseError, UserId, MAX_CONTENT_LENGTH, MIN_CONTENT_LENGTH,
};
