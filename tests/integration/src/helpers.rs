//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chirp_api::{create_app, AppState, HttpSettings};
use chirp_common::{CorsConfig, JwtService, RateLimitConfig};
use chirp_core::UserId;
use chirp_service::memory::{InMemoryIdentityProvider, InMemoryPostRepository, InMemoryRateLimiter};
use chirp_service::ServiceContext;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Secret used to sign session tokens in tests
pub const TEST_JWT_SECRET: &str = "integration-test-secret-key";

/// Options for a test server
#[derive(Debug, Clone)]
pub struct TestServerOptions {
    /// Post creations allowed per window, per user
    pub post_limit: u32,
    pub post_window: Duration,
    /// Users known to the identity provider as `(id, username)`
    pub users: Vec<(String, String)>,
}

impl Default for TestServerOptions {
    fn default() -> Self {
        Self {
            post_limit: 3,
            post_window: Duration::from_secs(60),
            users: vec![
                ("user_alice".to_string(), "alice".to_string()),
                ("user_bob".to_string(), "bob".to_string()),
            ],
        }
    }
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub posts: Arc<InMemoryPostRepository>,
    pub identity: Arc<InMemoryIdentityProvider>,
    pub rate_limiter: Arc<InMemoryRateLimiter>,
    jwt: JwtService,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server with default options
    pub async fn start() -> Result<Self> {
        Self::start_with(TestServerOptions::default()).await
    }

    /// Start a test server with custom options
    pub async fn start_with(options: TestServerOptions) -> Result<Self> {
        let posts = Arc::new(InMemoryPostRepository::new());
        let identity = Arc::new(InMemoryIdentityProvider::new());
        for (id, username) in &options.users {
            identity.insert(chirp_core::AuthorProfile {
                id: UserId::new(id.as_str()),
                username: Some(username.clone()),
                profile_image_url: format!("https://img.example.com/{id}.png"),
            });
        }
        let rate_limiter = Arc::new(InMemoryRateLimiter::new(
            options.post_limit,
            options.post_window,
        ));

        let ctx = ServiceContext::new(posts.clone(), identity.clone(), rate_limiter.clone());
        let jwt = JwtService::new(TEST_JWT_SECRET, 900);
        let state = AppState::new(ctx, jwt.clone());

        let settings = HttpSettings {
            rate_limit: RateLimitConfig {
                requests_per_second: 10_000,
                burst: 10_000,
            },
            cors: CorsConfig {
                allowed_origins: Vec::new(),
            },
            is_production: false,
        };
        let app = create_app(state, &settings)?;

        // Bind to an ephemeral port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            posts,
            identity,
            rate_limiter,
            jwt,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Issue a session token for a user
    pub fn token_for(&self, user_id: &str) -> Result<String> {
        Ok(self.jwt.issue_access_token(&UserId::new(user_id))?)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
