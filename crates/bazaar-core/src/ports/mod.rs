//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod repository;
mod storage;

pub use repository::{
    AdRepository, BaseRepository, CategoryRepository, Repositories, UserRepository,
};
pub use storage::{ImageStorage, ImageUpload};
