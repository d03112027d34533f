//! # chirp-service
//!
//! Application layer: the post creation pipeline, author enrichment, the
//! read-side queries, DTOs, and in-memory adapters for the ports.

pub mod dto;
pub mod memory;
pub mod services;

pub use services::{
    enrich_posts, HealthService, PostService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, Session,
};
