//! Post entity - an immutable emoji-only message

use chrono::{DateTime, Utc};

use crate::entities::{Author, AuthorProfile};
use crate::error::DomainError;
use crate::value_objects::{Snowflake, UserId};

/// Post entity as stored by the post store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Snowflake,
    pub author_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new Post stamped with the current time
    pub fn new(id: Snowflake, author_id: UserId, content: String) -> Self {
        Self {
            id,
            author_id,
            content,
            created_at: Utc::now(),
        }
    }

    /// Check if the post was written by the given user
    #[inline]
    pub fn is_authored_by(&self, user_id: &UserId) -> bool {
        &self.author_id == user_id
    }
}

/// A post joined with its resolved author.
///
/// Only constructible through [`EnrichedPost::new`], which refuses profiles
/// that belong to someone else or have no username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedPost {
    post: Post,
    author: Author,
}

impl EnrichedPost {
    /// Join a post with the profile of its author
    pub fn new(post: Post, profile: &AuthorProfile) -> Result<Self, DomainError> {
        if profile.id != post.author_id {
            return Err(DomainError::AuthorNotFound(post.author_id.clone()));
        }

        let author = profile.to_author()?;
        Ok(Self { post, author })
    }

    pub fn post(&self) -> &Post {
        &self.post
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    /// Split into the post and its author
    pub fn into_parts(self) -> (Post, Author) {
        (self.post, self.author)
    }
}
