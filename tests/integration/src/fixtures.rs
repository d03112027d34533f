//! Test fixtures and wire types
//!
//! Request bodies and the JSON shapes returned by the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Create post request
#[derive(Debug, Serialize)]
pub struct CreatePost {
    pub content: String,
}

impl CreatePost {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Post as returned by the API
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostBody {
    pub id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Author as returned by the API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorBody {
    pub id: String,
    pub username: String,
    pub profile_image_url: String,
}

/// Post joined with its author
#[derive(Debug, Clone, Deserialize)]
pub struct EnrichedPostBody {
    pub post: PostBody,
    pub author: AuthorBody,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

/// Error detail
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

/// A handful of valid emoji posts
pub fn sample_contents() -> Vec<&'static str> {
    vec!["😀", "🦀🔥", "👩‍💻", "🇯🇵", "👍🏽", "1️⃣"]
}
