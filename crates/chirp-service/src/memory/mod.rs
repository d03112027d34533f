//! In-memory implementations of the domain ports.
//!
//! Used by tests and local runs without Postgres, Redis or an identity
//! provider. Each adapter counts its calls so tests can assert which ports a
//! request touched.

mod identity;
mod post_repository;
mod rate_limiter;

pub use identity::InMemoryIdentityProvider;
pub use post_repository::InMemoryPostRepository;
pub use rate_limiter::InMemoryRateLimiter;
