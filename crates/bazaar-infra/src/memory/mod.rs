//! In-memory catalog - used when no database is configured.
//!
//! Implements every repository port over a single shared store, so one
//! `Arc<InMemoryCatalog>` backs the whole [`Repositories`] set.
//! Note: Data is lost on process restart.

mod fixtures;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use bazaar_core::domain::{Ad, Category, Location, NewAd, User};
use bazaar_core::error::RepoError;
use bazaar_core::ports::{
    AdRepository, BaseRepository, CategoryRepository, Repositories, UserRepository,
};

pub use fixtures::{FixtureError, Fixtures, UserFixture};

#[derive(Debug, Default)]
struct CatalogData {
    users: BTreeMap<i64, User>,
    locations: BTreeMap<i64, Location>,
    /// User id -> linked location ids.
    user_locations: BTreeMap<i64, Vec<i64>>,
    categories: BTreeMap<i64, Category>,
    ads: BTreeMap<i64, Ad>,
    /// Last id handed out for an ad. Ids are never reused.
    last_ad_id: i64,
}

/// In-memory store for users, locations, categories and ads.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    data: RwLock<CatalogData>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap the catalog into the repository set used by the ad operations.
    pub fn repositories(self: Arc<Self>) -> Repositories {
        Repositories {
            ads: self.clone(),
            users: self.clone(),
            categories: self,
        }
    }

    pub async fn add_location(&self, location: Location) {
        let mut data = self.data.write().await;
        data.locations.insert(location.id, location);
    }

    /// Associate a location with a user. Both must already exist.
    pub async fn link_location(&self, user_id: i64, location_id: i64) -> Result<(), RepoError> {
        let mut data = self.data.write().await;
        if !data.users.contains_key(&user_id) || !data.locations.contains_key(&location_id) {
            return Err(RepoError::Constraint(format!(
                "cannot link user {user_id} to location {location_id}"
            )));
        }

        let linked = data.user_locations.entry(user_id).or_default();
        if !linked.contains(&location_id) {
            linked.push(location_id);
            linked.sort_unstable();
        }
        Ok(())
    }

    /// Insert an ad with a known id, keeping foreign keys consistent.
    pub async fn insert_ad(&self, ad: Ad) -> Result<Ad, RepoError> {
        let mut data = self.data.write().await;
        check_references(&data, ad.author_id, ad.category_id)?;
        if data.ads.contains_key(&ad.id) {
            return Err(RepoError::Constraint(format!("ad {} already exists", ad.id)));
        }

        data.last_ad_id = data.last_ad_id.max(ad.id);
        data.ads.insert(ad.id, ad.clone());
        Ok(ad)
    }
}

fn check_references(data: &CatalogData, author_id: i64, category_id: i64) -> Result<(), RepoError> {
    if !data.users.contains_key(&author_id) {
        return Err(RepoError::Constraint(format!("user {author_id} does not exist")));
    }
    if !data.categories.contains_key(&category_id) {
        return Err(RepoError::Constraint(format!(
            "category {category_id} does not exist"
        )));
    }
    Ok(())
}

/// Users are provisioned outside the ad endpoints, so saving one upserts.
#[async_trait]
impl BaseRepository<User, i64> for InMemoryCatalog {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        Ok(self.data.read().await.users.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut data = self.data.write().await;
        let taken = data
            .users
            .values()
            .any(|u| u.username == user.username && u.id != user.id);
        if taken {
            return Err(RepoError::Constraint(format!(
                "username {} already exists",
                user.username
            )));
        }

        data.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut data = self.data.write().await;
        data.users.remove(&id).ok_or(RepoError::NotFound)?;
        data.user_locations.remove(&id);
        data.ads.retain(|_, ad| ad.author_id != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryCatalog {
    async fn location_names(&self, user_id: i64) -> Result<Vec<String>, RepoError> {
        let data = self.data.read().await;
        let names = data
            .user_locations
            .get(&user_id)
            .into_iter()
            .flatten()
            .filter_map(|id| data.locations.get(id))
            .map(|loc| loc.name.clone())
            .collect();
        Ok(names)
    }
}

/// Saving a category upserts, like users.
#[async_trait]
impl BaseRepository<Category, i64> for InMemoryCatalog {
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, RepoError> {
        Ok(self.data.read().await.categories.get(&id).cloned())
    }

    async fn save(&self, category: Category) -> Result<Category, RepoError> {
        let mut data = self.data.write().await;
        data.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut data = self.data.write().await;
        data.categories.remove(&id).ok_or(RepoError::NotFound)?;
        data.ads.retain(|_, ad| ad.category_id != id);
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCatalog {}

#[async_trait]
impl BaseRepository<Ad, i64> for InMemoryCatalog {
    async fn find_by_id(&self, id: i64) -> Result<Option<Ad>, RepoError> {
        Ok(self.data.read().await.ads.get(&id).cloned())
    }

    /// Updates an existing ad; saving an unknown id is `NotFound`.
    async fn save(&self, ad: Ad) -> Result<Ad, RepoError> {
        let mut data = self.data.write().await;
        check_references(&data, ad.author_id, ad.category_id)?;
        let slot = data.ads.get_mut(&ad.id).ok_or(RepoError::NotFound)?;
        *slot = ad.clone();
        Ok(ad)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut data = self.data.write().await;
        data.ads.remove(&id).ok_or(RepoError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl AdRepository for InMemoryCatalog {
    async fn create(&self, new_ad: NewAd) -> Result<Ad, RepoError> {
        let mut data = self.data.write().await;
        check_references(&data, new_ad.author_id, new_ad.category_id)?;

        data.last_ad_id += 1;
        let ad = Ad {
            id: data.last_ad_id,
            name: new_ad.name,
            author_id: new_ad.author_id,
            category_id: new_ad.category_id,
            price: new_ad.price,
            description: new_ad.description,
            is_published: new_ad.is_published,
            image: new_ad.image.filter(|path| !path.is_empty()),
        };
        data.ads.insert(ad.id, ad.clone());

        tracing::debug!(ad_id = ad.id, "Inserted ad (in-memory)");
        Ok(ad)
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.data.read().await.ads.len() as u64)
    }

    async fn list_page(&self, page_idx: u64, per_page: u64) -> Result<Vec<Ad>, RepoError> {
        let data = self.data.read().await;
        let mut ads: Vec<&Ad> = data.ads.values().collect();
        // BTreeMap yields ids ascending; a stable sort keeps that for equal prices.
        ads.sort_by(|a, b| b.price.cmp(&a.price));

        let skip = usize::try_from(page_idx.saturating_mul(per_page)).unwrap_or(usize::MAX);
        let take = usize::try_from(per_page).unwrap_or(usize::MAX);
        Ok(ads.into_iter().skip(skip).take(take).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_core::ads;
    use bazaar_core::domain::{AdPatch, UserRole};
    use bazaar_core::error::DomainError;

    fn user(id: i64, username: &str) -> User {
        User {
            id,
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            username: username.to_string(),
            password: "pass".to_string(),
            role: UserRole::Member,
            age: 30,
        }
    }

    fn new_ad(name: &str, price: i32) -> NewAd {
        NewAd {
            name: name.to_string(),
            author_id: 1,
            category_id: 1,
            price,
            description: Some("desc".to_string()),
            is_published: false,
            image: None,
        }
    }

    async fn seeded() -> Arc<InMemoryCatalog> {
        let catalog = Arc::new(InMemoryCatalog::new());
        BaseRepository::<User, i64>::save(catalog.as_ref(), user(1, "anna")).await.unwrap();
        BaseRepository::<User, i64>::save(catalog.as_ref(), user(2, "boris")).await.unwrap();
        BaseRepository::<Category, i64>::save(
            catalog.as_ref(),
            Category {
                id: 1,
                name: "Books".to_string(),
            },
        )
        .await
        .unwrap();
        catalog
            .add_location(Location {
                id: 2,
                name: "Kazan".to_string(),
                lat: None,
                lng: None,
            })
            .await;
        catalog
            .add_location(Location {
                id: 1,
                name: "Moscow".to_string(),
                lat: None,
                lng: None,
            })
            .await;
        catalog.link_location(1, 2).await.unwrap();
        catalog.link_location(1, 1).await.unwrap();
        catalog
    }

    #[tokio::test]
    async fn test_create_and_get_detail() {
        let repos = seeded().await.repositories();

        let created = ads::create_ad(&repos, new_ad("Novel", 300)).await.unwrap();
        assert_eq!(created.ad.id, 1);

        let detail = ads::get_ad(&repos, created.ad.id).await.unwrap();
        assert_eq!(detail.author_username, "anna");
        assert_eq!(detail.category_name, "Books");
        assert_eq!(detail.address, vec!["Moscow".to_string(), "Kazan".to_string()]);
    }

    #[tokio::test]
    async fn test_create_with_missing_author_writes_nothing() {
        let repos = seeded().await.repositories();

        let err = ads::create_ad(
            &repos,
            NewAd {
                author_id: 404,
                ..new_ad("Novel", 300)
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            DomainError::NotFound {
                entity_type: "User",
                id: 404
            }
        ));
        assert_eq!(repos.ads.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_with_missing_category() {
        let repos = seeded().await.repositories();

        let err = ads::create_ad(
            &repos,
            NewAd {
                category_id: 9,
                ..new_ad("Novel", 300)
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            DomainError::NotFound {
                entity_type: "Category",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_listing_pages_by_price_then_id() {
        let repos = seeded().await.repositories();
        for i in 0..25 {
            // Prices repeat so the id tie-break is exercised.
            ads::create_ad(&repos, new_ad(&format!("ad {i}"), (i % 5) * 100))
                .await
                .unwrap();
        }

        let first = ads::list_ads(&repos, None).await.unwrap();
        assert_eq!(first.total, 25);
        assert_eq!(first.num_pages, 3);
        assert_eq!(first.items.len(), 10);

        let second = ads::list_ads(&repos, Some("2")).await.unwrap();
        assert_eq!(second.items.len(), 10);

        let third = ads::list_ads(&repos, Some("3")).await.unwrap();
        assert_eq!(third.number, 3);
        assert_eq!(third.items.len(), 5);

        let all: Vec<&Ad> = first
            .items
            .iter()
            .chain(&second.items)
            .chain(&third.items)
            .map(|d| &d.ad)
            .collect();
        for pair in all.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!(a.price > b.price || (a.price == b.price && a.id < b.id));
        }
    }

    #[tokio::test]
    async fn test_update_author_must_exist() {
        let repos = seeded().await.repositories();
        let created = ads::create_ad(&repos, new_ad("Novel", 300)).await.unwrap();

        let patch = AdPatch {
            author_id: Some(77),
            price: Some(1),
            ..Default::default()
        };
        let err = ads::update_ad(&repos, created.ad.id, patch).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity_type: "User", .. }));

        let unchanged = ads::get_ad(&repos, created.ad.id).await.unwrap();
        assert_eq!(unchanged.ad.price, 300);
    }

    #[tokio::test]
    async fn test_update_changes_author() {
        let repos = seeded().await.repositories();
        let created = ads::create_ad(&repos, new_ad("Novel", 300)).await.unwrap();

        let patch = AdPatch {
            author_id: Some(2),
            ..Default::default()
        };
        let updated = ads::update_ad(&repos, created.ad.id, patch).await.unwrap();
        assert_eq!(updated.author_username, "boris");
        assert!(updated.address.is_empty());
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let repos = seeded().await.repositories();
        let created = ads::create_ad(&repos, new_ad("Novel", 300)).await.unwrap();

        ads::delete_ad(&repos, created.ad.id).await.unwrap();
        assert!(matches!(
            ads::get_ad(&repos, created.ad.id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            ads::delete_ad(&repos, created.ad.id).await,
            Err(DomainError::NotFound { entity_type: "Ad", .. })
        ));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repos = seeded().await.repositories();
        let first = ads::create_ad(&repos, new_ad("a", 1)).await.unwrap();
        ads::delete_ad(&repos, first.ad.id).await.unwrap();

        let second = ads::create_ad(&repos, new_ad("b", 1)).await.unwrap();
        assert!(second.ad.id > first.ad.id);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let catalog = seeded().await;
        let err = BaseRepository::<User, i64>::save(catalog.as_ref(), user(3, "anna"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_deleting_user_cascades_to_ads() {
        let catalog = seeded().await;
        let repos = catalog.clone().repositories();
        ads::create_ad(&repos, new_ad("Novel", 300)).await.unwrap();

        BaseRepository::<User, i64>::delete(catalog.as_ref(), 1).await.unwrap();
        assert_eq!(repos.ads.count().await.unwrap(), 0);
        assert!(repos.users.location_names(1).await.unwrap().is_empty());
    }
}
