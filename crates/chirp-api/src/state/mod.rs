//! Application state
//!
//! Holds the shared state for the Axum application: the service context and
//! the session token verifier.

use std::sync::Arc;

use chirp_common::JwtService;
use chirp_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Session token verifier
    jwt_service: Arc<JwtService>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service_context: ServiceContext, jwt_service: JwtService) -> Self {
        Self {
            service_context: Arc::new(service_context),
            jwt_service: Arc::new(jwt_service),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("jwt_service", &self.jwt_service)
            .finish()
    }
}
