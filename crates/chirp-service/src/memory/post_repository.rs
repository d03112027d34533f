//! In-memory post store

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use chirp_core::entities::Post;
use chirp_core::error::DomainError;
use chirp_core::traits::{PostQuery, PostRepository, RepoResult};
use chirp_core::value_objects::{PostContent, Snowflake, SnowflakeGenerator, UserId};

/// Post store backed by a vector in insertion order
#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
    ids: Arc<SnowflakeGenerator>,
    create_calls: AtomicUsize,
    read_calls: AtomicUsize,
    fail_writes: RwLock<Option<String>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `create` fail with a database error
    pub fn fail_writes(&self, reason: impl Into<String>) {
        *self.fail_writes.write() = Some(reason.into());
    }

    /// Number of `create` calls, including failed ones
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Number of `find_by_id` and `find_many` calls
    pub fn read_calls(&self) -> usize {
        self.read_calls.load(Ordering::SeqCst)
    }

    /// Number of stored posts
    pub fn len(&self) -> usize {
        self.posts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.read().is_empty()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, author_id: &UserId, content: &PostContent) -> RepoResult<Post> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = self.fail_writes.read().clone() {
            return Err(DomainError::DatabaseError(reason));
        }

        let mut posts = self.posts.write();
        // timestamps never go backwards within the store
        let now = Utc::now();
        let created_at = posts.last().map_or(now, |last| last.created_at.max(now));

        let mut post = Post::new(self.ids.generate(), author_id.clone(), content.as_str().to_string());
        post.created_at = created_at;
        posts.push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.posts.read().iter().find(|p| p.id == id).cloned())
    }

    async fn find_many(&self, query: &PostQuery) -> RepoResult<Vec<Post>> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        let limit = usize::try_from(query.effective_limit()).unwrap_or(0);

        // newest insert first; ties on created_at resolve by insertion order
        Ok(self
            .posts
            .read()
            .iter()
            .rev()
            .filter(|p| query.author_id.as_ref().is_none_or(|a| p.is_authored_by(a)))
            .take(limit)
            .cloned()
            .collect())
    }
}
