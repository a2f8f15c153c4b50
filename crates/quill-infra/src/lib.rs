//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory store only
//! - `postgres` - Relational storage via SeaORM

pub mod database;
pub mod fixtures;

// Re-exports - In-Memory
pub use database::{DatabaseConfig, InMemoryPostRepository};

// Re-exports - SeaORM
#[cfg(feature = "postgres")]
pub use database::SeaOrmPostRepository;
