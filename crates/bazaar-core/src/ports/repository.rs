use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Ad, Category, NewAd, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an existing entity.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Fails with `RepoError::NotFound` if absent.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i64> {
    /// Names of the locations linked to a user, ordered by location id.
    async fn location_names(&self, user_id: i64) -> Result<Vec<String>, RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, i64> {}

/// Ad repository.
#[async_trait]
pub trait AdRepository: BaseRepository<Ad, i64> {
    /// Insert a new ad and return it with its assigned id.
    async fn create(&self, ad: NewAd) -> Result<Ad, RepoError>;

    /// Total number of ads.
    async fn count(&self) -> Result<u64, RepoError>;

    /// One page of ads ordered by price descending, then id ascending.
    /// `page_idx` is 0-based.
    async fn list_page(&self, page_idx: u64, per_page: u64) -> Result<Vec<Ad>, RepoError>;
}

/// The set of repositories the ad operations read and write.
#[derive(Clone)]
pub struct Repositories {
    pub ads: Arc<dyn AdRepository>,
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
}
