//! Business logic services
//!
//! Services orchestrate the domain ports held by [`ServiceContext`]. Each one
//! borrows the context for the duration of a request.

pub mod context;
pub mod enrichment;
pub mod error;
pub mod health;
pub mod post;
pub mod session;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use enrichment::enrich_posts;
pub use error::{ServiceError, ServiceResult};
pub use health::HealthService;
pub use post::PostService;
pub use session::Session;
