//! Route definitions
//!
//! API routes are mounted under /api/v1; health routes live at the root.

use axum::{routing::get, Router};

use crate::handlers::{health, posts};
use crate::state::AppState;

/// Create the main API router (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new().merge(post_routes()).merge(user_routes())
}

/// Post routes
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(posts::get_posts).post(posts::create_post))
        .route("/posts/:id", get(posts::get_post))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new().route("/users/:user_id/posts", get(posts::get_user_posts))
}
