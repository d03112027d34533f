//! Axum extractors for request handling
//!
//! Custom extractors for the caller session, JSON bodies, and path parameters.

mod auth;
mod json;
mod path;

pub use auth::OptionalAuthUser;
pub use json::JsonBody;
pub use path::{ApiPath, PostIdPath, UserIdPath};
