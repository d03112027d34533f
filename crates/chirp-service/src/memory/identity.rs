//! In-memory identity provider

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;

use chirp_core::error::DomainError;
use chirp_core::traits::{IdentityProvider, RepoResult, MAX_LOOKUP_BATCH};
use chirp_core::{AuthorProfile, UserId};

/// Identity provider serving a fixed set of profiles
#[derive(Debug, Default)]
pub struct InMemoryIdentityProvider {
    users: DashMap<UserId, AuthorProfile>,
    lookup_calls: AtomicUsize,
    batches: Mutex<Vec<Vec<UserId>>>,
    unavailable: Mutex<bool>,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user with a username and image derived from it
    pub fn with_user(self, id: &str, username: &str) -> Self {
        self.insert(AuthorProfile {
            id: UserId::new(id),
            username: Some(username.to_string()),
            profile_image_url: format!("https://img.example.com/{id}.png"),
        });
        self
    }

    /// Add or replace a profile
    pub fn insert(&self, profile: AuthorProfile) {
        self.users.insert(profile.id.clone(), profile);
    }

    /// Forget a user, as if deleted at the provider
    pub fn remove(&self, id: &UserId) {
        self.users.remove(id);
    }

    /// Make lookups fail as if the provider were down
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock() = unavailable;
    }

    /// Number of `lookup_users` calls
    pub fn lookup_calls(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    /// The id batches requested so far, in call order
    pub fn batches(&self) -> Vec<Vec<UserId>> {
        self.batches.lock().clone()
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn lookup_users(&self, ids: &[UserId]) -> RepoResult<Vec<AuthorProfile>> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        self.batches.lock().push(ids.to_vec());

        if *self.unavailable.lock() {
            return Err(DomainError::IdentityError("identity provider unavailable".into()));
        }
        if ids.len() > MAX_LOOKUP_BATCH {
            return Err(DomainError::IdentityError(format!(
                "batch of {} exceeds {MAX_LOOKUP_BATCH}",
                ids.len()
            )));
        }

        Ok(ids
            .iter()
            .filter_map(|id| self.users.get(id).map(|entry| entry.value().clone()))
            .collect())
    }
}
