//! Server setup and initialization
//!
//! Provides the application builder, adapter wiring, and the server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use chirp_cache::{RedisPool, RedisRateLimiter, SlidingWindow};
use chirp_common::{AppConfig, AppError, CorsConfig, JwtService, RateLimitConfig};
use chirp_core::SnowflakeGenerator;
use chirp_db::{create_pool, run_migrations, PgPostRepository, PoolSettings};
use chirp_identity::HttpIdentityProvider;
use chirp_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// HTTP-level settings for [`create_app`]
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub is_production: bool,
}

impl From<&AppConfig> for HttpSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            rate_limit: config.rate_limit.clone(),
            cors: config.cors.clone(),
            is_production: config.app.env.is_production(),
        }
    }
}

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState, settings: &HttpSettings) -> Result<Router, AppError> {
    let api = apply_rate_limit(create_router(), &settings.rate_limit)?;
    let router = api.merge(health_routes());
    let router = apply_middleware(router, &settings.cors, settings.is_production);
    Ok(router.with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: &AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolSettings::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Create Redis pool
    info!("Connecting to Redis...");
    let redis_pool =
        RedisPool::from_config(&config.redis).map_err(|e| AppError::Cache(e.to_string()))?;
    info!("Redis pool created");

    // Post ids
    let ids = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    // Ports
    let post_repo = Arc::new(PgPostRepository::new(pool.clone(), ids));
    let rate_limiter = Arc::new(RedisRateLimiter::new(
        redis_pool.clone(),
        SlidingWindow::from(&config.post_rate_limit),
    ));
    let identity = Arc::new(
        HttpIdentityProvider::from_config(&config.identity)
            .map_err(|e| AppError::ExternalService(e.to_string()))?,
    );

    let service_context = ServiceContextBuilder::new()
        .pool(pool)
        .redis_pool(Arc::new(redis_pool))
        .post_repo(post_repo)
        .identity(identity)
        .rate_limiter(rate_limiter)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    let jwt_service = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry);

    Ok(AppState::new(service_context, jwt_service))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    let local: SocketAddr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Failed to read local address: {e}")))?;
    info!("Server listening on http://{}", local);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(&config).await?;
    let app = create_app(state, &HttpSettings::from(&config))?;

    run_server(app, &addr).await
}
