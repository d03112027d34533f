//! # chirp-db
//!
//! Database layer implementing the post repository with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management and migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use chirp_core::SnowflakeGenerator;
//! use chirp_db::{create_pool, run_migrations, PgPostRepository, PoolSettings};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolSettings::default()).await?;
//!     run_migrations(&pool).await?;
//!     let posts = PgPostRepository::new(pool, Arc::new(SnowflakeGenerator::new(0)));
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, migrations_dir, ping, run_migrations, PgPool, PoolSettings};
pub use repositories::PgPostRepository;
