//! Author profiles as reported by the identity provider

use crate::error::DomainError;
use crate::value_objects::UserId;

/// Client-safe projection of an identity provider user.
///
/// The username is optional at the provider but required for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorProfile {
    pub id: UserId,
    pub username: Option<String>,
    pub profile_image_url: String,
}

impl AuthorProfile {
    /// Resolve into a displayable author, failing if no username is set
    pub fn to_author(&self) -> Result<Author, DomainError> {
        let username = self
            .username
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| DomainError::AuthorMissingUsername(self.id.clone()))?;

        Ok(Author {
            id: self.id.clone(),
            username: username.to_string(),
            profile_image_url: self.profile_image_url.clone(),
        })
    }
}

/// Author attached to an enriched post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: UserId,
    pub username: String,
    pub profile_image_url: String,
}
