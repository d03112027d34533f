//! Post entity <-> model mapper

use chirp_core::entities::Post;
use chirp_core::value_objects::{Snowflake, UserId};

use crate::models::PostModel;

/// Convert PostModel to Post entity
impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: Snowflake::new(model.id),
            author_id: UserId::new(model.author_id),
            content: model.content,
            created_at: model.created_at,
        }
    }
}

/// Column values for inserting a post
pub struct PostInsert<'a> {
    pub id: i64,
    pub author_id: &'a str,
    pub content: &'a str,
}

impl<'a> PostInsert<'a> {
    pub fn new(id: Snowflake, author_id: &'a UserId, content: &'a str) -> Self {
        Self {
            id: id.into_inner(),
            author_id: author_id.as_str(),
            content,
        }
    }
}
