//! Identity provider user payloads and the client-safe projection

use chirp_core::{AuthorProfile, UserId};
use serde::Deserialize;

/// User record as returned by the identity provider.
///
/// Only the fields needed for display are read; email addresses, phone
/// numbers and other private metadata in the payload are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityUser {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Older field name, used when `image_url` is absent
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

impl IdentityUser {
    /// Reduce to the projection that may leave the server
    #[must_use]
    pub fn into_profile(self) -> AuthorProfile {
        AuthorProfile {
            id: UserId::new(self.id),
            username: self.username,
            profile_image_url: self
                .image_url
                .or(self.profile_image_url)
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_drops_private_fields() {
        let user: IdentityUser = serde_json::from_str(
            r#"{
                "id": "user_1",
                "username": "alice",
                "image_url": "https://img.example.com/a.png",
                "email_addresses": [{"email_address": "alice@example.com"}],
                "private_metadata": {"role": "admin"}
            }"#,
        )
        .unwrap();

        let profile = user.into_profile();
        assert_eq!(profile.id.as_str(), "user_1");
        assert_eq!(profile.username.as_deref(), Some("alice"));
        assert_eq!(profile.profile_image_url, "https://img.example.com/a.png");
    }

    #[test]
    fn test_null_username_and_legacy_image_field() {
        let user: IdentityUser = serde_json::from_str(
            r#"{"id": "user_2", "username": null, "profile_image_url": "https://old.example.com/b.png"}"#,
        )
        .unwrap();

        let profile = user.into_profile();
        assert!(profile.username.is_none());
        assert_eq!(profile.profile_image_url, "https://old.example.com/b.png");
    }

    #[test]
    fn test_missing_image_defaults_to_empty() {
        let user: IdentityUser = serde_json::from_str(r#"{"id": "user_3"}"#).unwrap();
        assert_eq!(user.into_profile().profile_image_url, "");
    }
}
