//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in chirp-core.

mod error;
mod post;

pub use post::PgPostRepository;
