//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use chirp_core::{Author, EnrichedPost, Post};

use super::responses::{AuthorResponse, EnrichedPostResponse, PostResponse};

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.to_string(),
            author_id: post.author_id.to_string(),
            content: post.content.clone(),
            created_at: post.created_at,
        }
    }
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            author_id: post.author_id.into_inner(),
            content: post.content,
            created_at: post.created_at,
        }
    }
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        Self {
            id: author.id.into_inner(),
            username: author.username,
            profile_image_url: author.profile_image_url,
        }
    }
}

impl From<EnrichedPost> for EnrichedPostResponse {
    fn from(enriched: EnrichedPost) -> Self {
        let (post, author) = enriched.into_parts();
        Self {
            post: post.into(),
            author: author.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chirp_core::{AuthorProfile, Snowflake, UserId};

    #[test]
    fn test_enriched_post_mapping() {
        let post = Post::new(Snowflake::new(99), UserId::new("user_1"), "🎉".to_string());
        let profile = AuthorProfile {
            id: UserId::new("user_1"),
            username: Some("alice".to_string()),
            profile_image_url: "https://img.example.com/a.png".to_string(),
        };

        let response = EnrichedPostResponse::from(EnrichedPost::new(post, &profile).unwrap());
        assert_eq!(response.post.id, "99");
        assert_eq!(response.post.author_id, "user_1");
        assert_eq!(response.author.username, "alice");
    }
}
