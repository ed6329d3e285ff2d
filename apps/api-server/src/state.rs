//! Application state - shared across all handlers.

use std::path::Path;
use std::sync::Arc;

use bazaar_core::ports::{ImageStorage, Repositories};
use bazaar_infra::{Fixtures, InMemoryCatalog, LocalImageStorage};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub images: Arc<dyn ImageStorage>,
    pub max_upload_bytes: usize,
    /// Which catalog backs the repositories, reported by the health check.
    pub storage_backend: &'static str,
}

impl AppState {
    pub fn from_parts(
        repos: Repositories,
        images: Arc<dyn ImageStorage>,
        max_upload_bytes: usize,
        storage_backend: &'static str,
    ) -> Self {
        Self {
            repos,
            images,
            max_upload_bytes,
            storage_backend,
        }
    }

    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let images: Arc<dyn ImageStorage> = Arc::new(LocalImageStorage::new(
            config.media.root.clone(),
            config.media.url.clone(),
        ));

        #[cfg(feature = "postgres")]
        let (repos, backend) = match &config.database {
            Some(db_config) => match bazaar_infra::database::connect(db_config).await {
                Ok(conn) => (bazaar_infra::postgres_repositories(conn), "postgres"),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    (in_memory(config.fixtures_path.as_deref()).await, "in-memory")
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (in_memory(config.fixtures_path.as_deref()).await, "in-memory")
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (repos, backend) = {
            tracing::info!("Running without postgres feature - using in-memory catalog");
            (in_memory(config.fixtures_path.as_deref()).await, "in-memory")
        };

        tracing::info!(storage = backend, "Application state initialized");

        Self::from_parts(repos, images, config.media.max_upload_bytes, backend)
    }
}

/// In-memory catalog, seeded from fixtures when a path is configured.
async fn in_memory(fixtures: Option<&Path>) -> Repositories {
    let Some(path) = fixtures else {
        return Arc::new(InMemoryCatalog::new()).repositories();
    };

    let seeded = match Fixtures::from_file(path).await {
        Ok(fixtures) => InMemoryCatalog::from_fixtures(fixtures).await,
        Err(e) => Err(e),
    };

    match seeded {
        Ok(catalog) => catalog.repositories(),
        Err(e) => {
            tracing::error!(
                path = %path.display(),
                "Failed to load fixtures: {}. Starting with an empty catalog.",
                e
            );
            Arc::new(InMemoryCatalog::new()).repositories()
        }
    }
}
