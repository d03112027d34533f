//! Health service
//!
//! Liveness and readiness probes over the configured infrastructure.

use tracing::{instrument, warn};

use crate::dto::{CheckStatus, HealthResponse, ReadinessResponse};

use super::context::ServiceContext;

/// Health service
pub struct HealthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> HealthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn liveness(&self) -> HealthResponse {
        HealthResponse::healthy()
    }

    /// Ping PostgreSQL and Redis. A missing pool reports `disabled`.
    #[instrument(skip(self))]
    pub async fn readiness(&self) -> ReadinessResponse {
        let database = match self.ctx.pool() {
            Some(pool) => match chirp_db::ping(pool).await {
                Ok(()) => CheckStatus::Healthy,
                Err(e) => {
                    warn!(error = %e, "Database readiness check failed");
                    CheckStatus::Unhealthy
                }
            },
            None => CheckStatus::Disabled,
        };

        let redis = match self.ctx.redis_pool() {
            Some(pool) => match pool.health_check().await {
                Ok(()) => CheckStatus::Healthy,
                Err(e) => {
                    warn!(error = %e, "Redis readiness check failed");
                    CheckStatus::Unhealthy
                }
            },
            None => CheckStatus::Disabled,
        };

        ReadinessResponse::from_checks(database, redis)
    }
}
