//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Post fields use
//! camelCase keys and snowflake ids are serialized as strings.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ============================================================================
// Post Responses
// ============================================================================

/// Post as stored
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Public author profile
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: String,
    pub username: String,
    pub profile_image_url: String,
}

/// Post with its resolved author
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedPostResponse {
    pub post: PostResponse,
    pub author: AuthorResponse,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// State of a single readiness dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Healthy,
    Unhealthy,
    /// Not configured in this deployment
    Disabled,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Unhealthy => "unhealthy",
            Self::Disabled => "disabled",
        }
    }

    fn is_ok(&self) -> bool {
        !matches!(self, Self::Unhealthy)
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

impl ReadinessResponse {
    pub fn from_checks(database: CheckStatus, redis: CheckStatus) -> Self {
        let ready = database.is_ok() && redis.is_ok();
        Self {
            status: if ready { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: database.as_str().to_string(),
                redis: redis.as_str().to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_response_uses_camel_case() {
        let post = PostResponse {
            id: "42".to_string(),
            author_id: "user_1".to_string(),
            content: "😀".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["id"], "42");
        assert_eq!(json["authorId"], "user_1");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("author_id").is_none());
    }

    #[test]
    fn test_enriched_post_shape() {
        let enriched = EnrichedPostResponse {
            post: PostResponse {
                id: "1".to_string(),
                author_id: "user_1".to_string(),
                content: "🔥".to_string(),
                created_at: Utc::now(),
            },
            author: AuthorResponse {
                id: "user_1".to_string(),
                username: "alice".to_string(),
                profile_image_url: "https://img.example.com/a.png".to_string(),
            },
        };

        let json = serde_json::to_value(&enriched).unwrap();
        assert_eq!(json["post"]["content"], "🔥");
        assert_eq!(json["author"]["profileImageUrl"], "https://img.example.com/a.png");
    }

    #[test]
    fn test_health_response() {
        let health = HealthResponse::healthy();
        assert_eq!(health.status, "healthy");
    }

    #[test]
    fn test_readiness() {
        let ready = ReadinessResponse::from_checks(CheckStatus::Healthy, CheckStatus::Disabled);
        assert!(ready.is_ready());
        assert_eq!(ready.checks.redis, "disabled");

        let not_ready = ReadinessResponse::from_checks(CheckStatus::Unhealthy, CheckStatus::Healthy);
        assert!(!not_ready.is_ready());
        assert_eq!(not_ready.status, "not_ready");
    }
}
