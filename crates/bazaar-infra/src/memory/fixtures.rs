//! JSON fixtures for seeding the in-memory catalog.
//!
//! ```json
//! {
//!   "locations": [{"id": 1, "name": "Moscow", "lat": 55.75, "lng": 37.61}],
//!   "categories": [{"id": 1, "name": "Books"}],
//!   "users": [{"id": 1, "first_name": "Anna", "last_name": "P", "username": "anna",
//!              "password": "x", "role": "member", "age": 30, "locations": [1]}],
//!   "ads": [{"id": 1, "name": "Novel", "author_id": 1, "category_id": 1,
//!            "price": 300, "is_published": true}]
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use bazaar_core::domain::{Ad, Category, Location, User};
use bazaar_core::error::RepoError;
use bazaar_core::ports::BaseRepository;

use super::InMemoryCatalog;

/// A user together with the ids of its locations.
#[derive(Debug, Clone, Deserialize)]
pub struct UserFixture {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub locations: Vec<i64>,
}

/// Contents of a fixture file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub users: Vec<UserFixture>,
    #[serde(default)]
    pub ads: Vec<Ad>,
}

/// Fixture loading errors.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("Failed to read fixtures: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed fixtures: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Inconsistent fixtures: {0}")]
    Invalid(#[from] RepoError),
}

impl Fixtures {
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let raw = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl InMemoryCatalog {
    /// Build a catalog seeded with the given fixtures.
    ///
    /// Fails if any user, location, category or ad reference is dangling.
    pub async fn from_fixtures(fixtures: Fixtures) -> Result<Arc<Self>, FixtureError> {
        let catalog = Arc::new(Self::new());

        for location in fixtures.locations {
            catalog.add_location(location).await;
        }
        for category in fixtures.categories {
            BaseRepository::<Category, i64>::save(catalog.as_ref(), category).await?;
        }
        for UserFixture { user, locations } in fixtures.users {
            let user_id = user.id;
            BaseRepository::<User, i64>::save(catalog.as_ref(), user).await?;
            for location_id in locations {
                catalog.link_location(user_id, location_id).await?;
            }
        }
        let ad_count = fixtures.ads.len();
        for ad in fixtures.ads {
            catalog.insert_ad(ad).await?;
        }

        tracing::info!(ads = ad_count, "In-memory catalog seeded from fixtures");
        Ok(catalog)
    }
}
