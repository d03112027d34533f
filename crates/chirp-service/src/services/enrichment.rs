//! Post enrichment
//!
//! Joins posts with the profiles of their authors. Every distinct author is
//! looked up once, in batches of at most [`MAX_LOOKUP_BATCH`] ids. A single
//! unresolved author fails the whole batch.

use std::collections::{HashMap, HashSet};

use tracing::{instrument, warn};

use chirp_core::error::DomainError;
use chirp_core::traits::{IdentityProvider, MAX_LOOKUP_BATCH};
use chirp_core::{AuthorProfile, EnrichedPost, Post, UserId};

use super::error::{ServiceError, ServiceResult};

/// Distinct author ids in order of first appearance
fn distinct_authors(posts: &[Post]) -> Vec<UserId> {
    let mut seen = HashSet::new();
    posts
        .iter()
        .filter(|post| seen.insert(&post.author_id))
        .map(|post| post.author_id.clone())
        .collect()
}

/// Resolve the authors of `posts` and join them, preserving input order
#[instrument(skip_all, fields(posts = posts.len()))]
pub async fn enrich_posts(
    identity: &dyn IdentityProvider,
    posts: Vec<Post>,
) -> ServiceResult<Vec<EnrichedPost>> {
    if posts.is_empty() {
        return Ok(Vec::new());
    }

    let author_ids = distinct_authors(&posts);
    let mut profiles: HashMap<UserId, AuthorProfile> = HashMap::with_capacity(author_ids.len());
    for chunk in author_ids.chunks(MAX_LOOKUP_BATCH) {
        for profile in identity.lookup_users(chunk).await? {
            profiles.insert(profile.id.clone(), profile);
        }
    }

    posts
        .into_iter()
        .map(|post| {
            let profile = profiles
                .get(&post.author_id)
                .ok_or_else(|| DomainError::AuthorNotFound(post.author_id.clone()))?;
            EnrichedPost::new(post, profile)
        })
        .collect::<Result<Vec<_>, DomainError>>()
        .map_err(|err| {
            warn!(error = %err, "Could not enrich posts");
            ServiceError::from(err)
        })
}
