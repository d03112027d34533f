//! Integration test utilities for the chirp server
//!
//! This crate provides helpers for running end-to-end tests against the
//! REST API, backed by the in-memory post store, identity provider and
//! rate limiter.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
