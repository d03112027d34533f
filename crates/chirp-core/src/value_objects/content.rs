//! Post content grammar
//!
//! A post is a run of emoji characters, each one either extended pictographic
//! or an emoji component (modifiers, ZWJ, variation selectors, keycap parts,
//! regional indicators). Length is measured in UTF-16 code units, so an emoji
//! outside the Basic Multilingual Plane counts as two.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Minimum post length in UTF-16 code units
pub const MIN_CONTENT_LENGTH: usize = 1;

/// Maximum post length in UTF-16 code units
pub const MAX_CONTENT_LENGTH: usize = 280;

static EMOJI_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\p{Extended_Pictographic}|\p{Emoji_Component})+$")
        .expect("Invalid emoji regex")
});

/// Check that a string is made of emoji characters only
pub fn is_emoji_only(content: &str) -> bool {
    EMOJI_ONLY.is_match(content)
}

/// Reasons a content string is not a valid post
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    #[error("Post must contain at least {min} character(s)")]
    TooShort { min: usize },

    #[error("Post must contain at most {max} character(s)")]
    TooLong { max: usize },

    #[error("Only emoji's are allowed.")]
    NotEmoji,
}

/// Validated post content
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostContent(String);

/// Length of a string as counted against the post bounds
pub fn content_length(content: &str) -> usize {
    content.encode_utf16().count()
}

/// Every rule a content string breaks, in check order: grammar, minimum
/// length, maximum length. Empty when the content is a valid post.
pub fn content_violations(content: &str) -> Vec<ContentError> {
    let length = content_length(content);
    let mut violations = Vec::new();

    if !is_emoji_only(content) {
        violations.push(ContentError::NotEmoji);
    }
    if length < MIN_CONTENT_LENGTH {
        violations.push(ContentError::TooShort {
            min: MIN_CONTENT_LENGTH,
        });
    }
    if length > MAX_CONTENT_LENGTH {
        violations.push(ContentError::TooLong {
            max: MAX_CONTENT_LENGTH,
        });
    }

    violations
}

impl PostContent {
    /// Validate a content string against the post grammar, reporting the
    /// first rule it breaks.
    pub fn parse(content: impl Into<String>) -> Result<Self, ContentError> {
        let content = content.into();

        match content_violations(&content).into_iter().next() {
            Some(err) => Err(err),
            None => Ok(Self(content)),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PostContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PostContent {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
