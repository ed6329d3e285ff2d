//! # Bazaar Infrastructure
//!
//! Concrete implementations of the ports defined in `bazaar-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM
//! - `minimal` - No external services, in-memory catalog only

pub mod database;
pub mod memory;
pub mod storage;

pub use database::DatabaseConfig;
pub use memory::{Fixtures, InMemoryCatalog};
pub use storage::LocalImageStorage;

#[cfg(feature = "postgres")]
pub use database::{
    PostgresAdRepository, PostgresCategoryRepository, PostgresUserRepository, postgres_repositories,
};
