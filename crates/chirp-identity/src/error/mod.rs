//! Identity adapter errors

use chirp_core::DomainError;

/// Errors raised while talking to the identity provider
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Identity request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Identity provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response from identity provider: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("Too many user ids in one lookup: {0}")]
    BatchTooLarge(usize),
}

impl From<IdentityError> for DomainError {
    fn from(err: IdentityError) -> Self {
        DomainError::IdentityError(err.to_string())
    }
}

/// Result type for identity adapter operations
pub type IdentityResult<T> = Result<T, IdentityError>;
