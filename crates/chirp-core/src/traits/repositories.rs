//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::Post;
use crate::error::DomainError;
use crate::value_objects::{PostContent, Snowflake, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Upper bound on posts returned by a single query
pub const MAX_POSTS_PER_QUERY: i64 = 100;

// ============================================================================
// Post Repository
// ============================================================================

/// Filter for listing posts, newest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    /// Only posts by this author
    pub author_id: Option<UserId>,
    /// Maximum number of posts (clamped to 1..=100)
    pub limit: i64,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            author_id: None,
            limit: MAX_POSTS_PER_QUERY,
        }
    }
}

impl PostQuery {
    /// The global feed
    pub fn latest() -> Self {
        Self::default()
    }

    /// Posts by a single author
    pub fn by_author(author_id: UserId) -> Self {
        Self {
            author_id: Some(author_id),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Limit actually applied by stores
    pub fn effective_limit(&self) -> i64 {
        self.limit.clamp(1, MAX_POSTS_PER_QUERY)
    }
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a new post. The store assigns its id and creation time.
    async fn create(&self, author_id: &UserId, content: &PostContent) -> RepoResult<Post>;

    /// Find post by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>>;

    /// List posts newest first; ties on `created_at` resolve to the later insert first
    async fn find_many(&self, query: &PostQuery) -> RepoResult<Vec<Post>>;
}
