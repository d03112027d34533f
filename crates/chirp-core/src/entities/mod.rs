//! Domain entities - core business objects

mod author;
mod post;

pub use author::{Author, AuthorProfile};
pub use post::{EnrichedPost, Post};
