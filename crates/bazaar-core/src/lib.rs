//! # Bazaar Core
//!
//! The domain layer of the Bazaar classified-ads backend.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod ads;
pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;

pub use error::{DomainError, RepoError, StorageError};
