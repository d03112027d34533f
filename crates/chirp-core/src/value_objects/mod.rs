//! Value objects - immutable types that represent domain concepts

mod content;
mod snowflake;
mod user_id;

pub use content::{
    content_length, content_violations, is_emoji_only, ContentError, PostContent,
    MAX_CONTENT_LENGTH, MIN_CONTENT_LENGTH,
};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
pub use user_id::UserId;
