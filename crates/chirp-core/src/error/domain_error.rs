//! Domain errors - error types for the domain layer and its ports

use thiserror::Error;

use crate::value_objects::{ContentError, Snowflake, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Post not found: {0}")]
    PostNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    InvalidContent(#[from] ContentError),

    // =========================================================================
    // Enrichment Errors
    // =========================================================================
    #[error("Could not find author for post: {0}")]
    AuthorNotFound(UserId),

    #[error("Author has no username: {0}")]
    AuthorMissingUsername(UserId),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Identity provider error: {0}")]
    IdentityError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::PostNotFound(_) => "NOT_FOUND",
            Self::ValidationError(_) | Self::InvalidContent(_) => "BAD_REQUEST",
            Self::AuthorNotFound(_)
            | Self::AuthorMissingUsername(_)
            | Self::DatabaseError(_)
            | Self::CacheError(_)
            | Self::IdentityError(_)
            | Self::InternalError(_) => "INTERNAL",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PostNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::InvalidContent(_))
    }

    /// Check if an author could not be resolved for display
    pub fn is_enrichment(&self) -> bool {
        matches!(
            self,
            Self::AuthorNotFound(_) | Self::AuthorMissingUsername(_)
        )
    }

    /// Check if an external service (store, cache, identity) failed
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Self::DatabaseError(_) | Self::CacheError(_) | Self::IdentityError(_)
        )
    }
}
