//! Service layer error types
//!
//! One variant per failure class of the post pipeline and read paths, each
//! mapped to a stable API error code.

use std::fmt;
use std::time::Duration;

use chirp_common::AppError;
use chirp_core::DomainError;
use serde_json::{Map, Value};
use validator::ValidationErrors;

/// Message shown to rate limited callers
pub const RATE_LIMITED_MESSAGE: &str = "You have made too many requests. Please try again later.";

/// Message shown when a post's author cannot be resolved
pub const ENRICHMENT_MESSAGE: &str = "Could not find author for post";

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Request failed field validation
    Validation(ValidationErrors),

    /// No authenticated caller
    Unauthorized,

    /// Caller exceeded the post rate limit
    RateLimited { retry_after: Option<Duration> },

    /// The post store rejected a write
    Persistence(DomainError),

    /// A post's author could not be resolved for display
    Enrichment(DomainError),

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// Domain rule violation or infrastructure failure
    Domain(DomainError),

    /// Application error (configuration, tokens)
    App(AppError),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(errors) => match first_message(errors) {
                Some(message) => write!(f, "{message}"),
                None => write!(f, "Invalid request"),
            },
            Self::Unauthorized => write!(f, "You must be signed in to post"),
            Self::RateLimited { .. } => write!(f, "{RATE_LIMITED_MESSAGE}"),
            Self::Persistence(e) => write!(f, "Could not save post: {e}"),
            Self::Enrichment(e) => write!(f, "{ENRICHMENT_MESSAGE}: {e}"),
            Self::NotFound { resource, .. } => write!(f, "{resource} not found"),
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Persistence(e) | Self::Enrichment(e) | Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Unauthorized => 401,
            Self::RateLimited { .. } => 429,
            Self::NotFound { .. } => 404,
            Self::Persistence(_) | Self::Enrichment(_) | Self::Internal(_) => 500,
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_validation() {
                    400
                } else {
                    500
                }
            }
            Self::App(e) => e.status_code(),
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "BAD_REQUEST",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::RateLimited { .. } => "TOO_MANY_REQUESTS",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Persistence(_) | Self::Enrichment(_) | Self::Internal(_) => "INTERNAL",
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
        }
    }

    /// Message safe to show to the caller
    pub fn public_message(&self) -> String {
        match self {
            Self::Enrichment(_) => ENRICHMENT_MESSAGE.to_string(),
            Self::Domain(e) if e.is_validation() => e.to_string(),
            _ if self.status_code() >= 500 => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }

    /// Field-level messages keyed by field name, for validation failures
    pub fn details(&self) -> Option<Value> {
        match self {
            Self::Validation(errors) => Some(field_errors(errors)),
            _ => None,
        }
    }

    /// How long a rate limited caller should wait
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

/// Flatten validation errors into `{ field: [message, ...] }`
pub fn field_errors(errors: &ValidationErrors) -> Value {
    let mut fields = Map::new();
    for (field, errs) in errors.field_errors() {
        let messages = errs
            .iter()
            .map(|e| {
                Value::String(
                    e.message
                        .as_ref()
                        .map_or_else(|| e.code.to_string(), ToString::to_string),
                )
            })
            .collect();
        fields.insert(field.to_string(), Value::Array(messages));
    }
    Value::Object(fields)
}

fn first_message(errors: &ValidationErrors) -> Option<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|e| e.message.as_ref().map(ToString::to_string))
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        if err.is_enrichment() {
            Self::Enrichment(err)
        } else {
            Self::Domain(err)
        }
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(err: ValidationErrors) -> Self {
        Self::Validation(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => {
                AppError::Validation(first_message(&errors).unwrap_or_default())
            }
            ServiceError::Unauthorized => AppError::MissingAuth,
            ServiceError::RateLimited { .. } => AppError::RateLimitExceeded,
            ServiceError::Persistence(e) | ServiceError::Enrichment(e) | ServiceError::Domain(e) => {
                AppError::Domain(e)
            }
            ServiceError::NotFound { resource, id } => {
                AppError::NotFound(format!("{resource} {id}"))
            }
            ServiceError::App(e) => e,
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chirp_core::{Snowflake, UserId};
    use validator::ValidationError;

    fn emoji_errors() -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.add(
            "content",
            ValidationError::new("emoji").with_message("Only emoji's are allowed.".into()),
        );
        errors
    }

    #[test]
    fn test_validation_error() {
        let err = ServiceError::Validation(emoji_errors());
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "BAD_REQUEST");
        assert_eq!(err.to_string(), "Only emoji's are allowed.");
        assert_eq!(
            err.details().unwrap(),
            serde_json::json!({ "content": ["Only emoji's are allowed."] })
        );
    }

    #[test]
    fn test_rate_limited_error() {
        let err = ServiceError::RateLimited {
            retry_after: Some(Duration::from_secs(12)),
        };
        assert_eq!(err.status_code(), 429);
        assert_eq!(err.error_code(), "TOO_MANY_REQUESTS");
        assert_eq!(err.public_message(), RATE_LIMITED_MESSAGE);
        assert_eq!(err.retry_after(), Some(Duration::from_secs(12)));
    }

    #[test]
    fn test_unauthorized_error() {
        assert_eq!(ServiceError::Unauthorized.status_code(), 401);
        assert_eq!(ServiceError::Unauthorized.error_code(), "UNAUTHORIZED");
    }

    #[test]
    fn test_not_found_error() {
        let err = ServiceError::not_found("Post", "123");
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert_eq!(err.public_message(), "Post not found");
    }

    #[test]
    fn test_enrichment_from_domain() {
        let err = ServiceError::from(DomainError::AuthorNotFound(UserId::new("user_1")));
        assert!(matches!(err, ServiceError::Enrichment(_)));
        assert_eq!(err.error_code(), "INTERNAL");
        assert_eq!(err.public_message(), ENRICHMENT_MESSAGE);
    }

    #[test]
    fn test_server_errors_hide_detail() {
        let err = ServiceError::Persistence(DomainError::DatabaseError("pool timed out".into()));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn test_convert_to_app_error() {
        let app_err: AppError = ServiceError::not_found("Post", "456").into();
        assert_eq!(app_err.status_code(), 404);

        let app_err: AppError = ServiceError::from(DomainError::PostNotFound(Snowflake::new(1))).into();
        assert_eq!(app_err.error_code(), "NOT_FOUND");
    }
}
