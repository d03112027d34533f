//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use std::borrow::Cow;

use chirp_core::{content_violations, ContentError};
use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

// ============================================================================
// Post Requests
// ============================================================================

/// Create post request
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostRequest {
    /// Emoji-only text, 1 to 280 UTF-16 code units
    pub content: String,
}

impl CreatePostRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl Validate for CreatePostRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for err in post_content_errors(&self.content) {
            errors.add("content", err);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Field errors for every post content rule a string breaks
pub fn post_content_errors(content: &str) -> Vec<ValidationError> {
    content_violations(content)
        .into_iter()
        .map(|err| {
            let code = match err {
                ContentError::TooShort { .. } => "too_short",
                ContentError::TooLong { .. } => "too_long",
                ContentError::NotEmoji => "emoji",
            };
            ValidationError::new(code).with_message(Cow::Owned(err.to_string()))
        })
        .collect()
}
