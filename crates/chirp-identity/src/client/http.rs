//! HTTP implementation of [`IdentityProvider`]

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use chirp_core::traits::{IdentityProvider, RepoResult, MAX_LOOKUP_BATCH};
use chirp_core::{AuthorProfile, UserId};

use super::user::IdentityUser;
use crate::error::{IdentityError, IdentityResult};

/// Longest error body kept for diagnostics
const MAX_ERROR_BODY: usize = 512;

/// Identity provider reached over its REST API.
///
/// Sends `GET {base_url}/v1/users?user_id=..&limit=N` authenticated with the
/// secret API key as a bearer token.
#[derive(Clone)]
pub struct HttpIdentityProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpIdentityProvider {
    /// Create a provider client with a request timeout
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> IdentityResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IdentityError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Create a provider client from application config
    pub fn from_config(config: &chirp_common::IdentityConfig) -> IdentityResult<Self> {
        Self::new(&config.api_url, &config.api_key, config.timeout())
    }

    fn users_url(&self) -> String {
        format!("{}/v1/users", self.base_url)
    }

    /// Fetch raw user records for up to [`MAX_LOOKUP_BATCH`] ids
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn fetch_users(&self, ids: &[UserId]) -> IdentityResult<Vec<IdentityUser>> {
        if ids.len() > MAX_LOOKUP_BATCH {
            return Err(IdentityError::BatchTooLarge(ids.len()));
        }

        let limit = ids.len().to_string();
        let mut query: Vec<(&str, &str)> = ids.iter().map(|id| ("user_id", id.as_str())).collect();
        query.push(("limit", limit.as_str()));

        let response = self
            .client
            .get(self.users_url())
            .bearer_auth(&self.api_key)
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body: String = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(MAX_ERROR_BODY)
                .collect();
            warn!(status = status.as_u16(), "Identity provider rejected lookup");
            return Err(IdentityError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let users: Vec<IdentityUser> = serde_json::from_slice(&bytes)?;
        debug!(found = users.len(), "Identity lookup complete");
        Ok(users)
    }
}

impl std::fmt::Debug for HttpIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpIdentityProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn lookup_users(&self, ids: &[UserId]) -> RepoResult<Vec<AuthorProfile>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let users = self.fetch_users(ids).await?;
        Ok(users.into_iter().map(IdentityUser::into_profile).collect())
    }
}
