//! # chirp-identity
//!
//! Adapter for the external identity provider. Looks up users by id in
//! batches and reduces them to the client-safe [`AuthorProfile`] projection
//! (id, username, profile image).
//!
//! [`AuthorProfile`]: chirp_core::AuthorProfile

pub mod client;
pub mod error;

pub use client::{HttpIdentityProvider, IdentityUser};
pub use error::{IdentityError, IdentityResult};
