//! PostgreSQL repository implementations.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use bazaar_core::domain::{Ad, NewAd};
use bazaar_core::error::RepoError;
use bazaar_core::ports::{AdRepository, CategoryRepository, Repositories, UserRepository};

use super::entity::ad::{self, Entity as AdEntity};
use super::entity::category::Entity as CategoryEntity;
use super::entity::location::{self, Entity as LocationEntity};
use super::entity::user::Entity as UserEntity;
use super::entity::user_location::{self, Entity as UserLocationEntity};
use super::postgres_base::{PostgresBaseRepository, repo_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL ad repository.
pub type PostgresAdRepository = PostgresBaseRepository<AdEntity>;

/// Build the full repository set over one connection pool.
pub fn postgres_repositories(db: DbConn) -> Repositories {
    Repositories {
        ads: Arc::new(PostgresAdRepository::new(db.clone())),
        users: Arc::new(PostgresUserRepository::new(db.clone())),
        categories: Arc::new(PostgresCategoryRepository::new(db)),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn location_names(&self, user_id: i64) -> Result<Vec<String>, RepoError> {
        tracing::debug!(user_id, "Loading user locations");

        let names = LocationEntity::find()
            .inner_join(UserLocationEntity)
            .filter(user_location::Column::UserId.eq(user_id))
            .order_by_asc(location::Column::Id)
            .all(&self.db)
            .await
            .map_err(repo_err)?
            .into_iter()
            .map(|loc| loc.name)
            .collect();

        Ok(names)
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {}

#[async_trait]
impl AdRepository for PostgresAdRepository {
    async fn create(&self, new_ad: NewAd) -> Result<Ad, RepoError> {
        let model = ad::ActiveModel::from(new_ad)
            .insert(&self.db)
            .await
            .map_err(repo_err)?;

        tracing::debug!(ad_id = model.id, "Inserted ad");
        Ok(model.into())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        AdEntity::find().count(&self.db).await.map_err(repo_err)
    }

    async fn list_page(&self, page_idx: u64, per_page: u64) -> Result<Vec<Ad>, RepoError> {
        // SeaORM's paginate uses 0-based page index internally via fetch_page
        let result = AdEntity::find()
            .order_by_desc(ad::Column::Price)
            .order_by_asc(ad::Column::Id)
            .paginate(&self.db, per_page)
            .fetch_page(page_idx)
            .await
            .map_err(repo_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
