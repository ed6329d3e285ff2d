//! Image storage port.

use async_trait::async_trait;

use crate::error::StorageError;

/// A file received from a client.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// File name as sent by the client.
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Storage for ad images - abstraction over local disk or object stores.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Persist an upload and return its path relative to the storage root.
    /// Never overwrites an existing file.
    async fn store(&self, upload: ImageUpload) -> Result<String, StorageError>;

    /// Public URL for a stored path.
    fn url(&self, path: &str) -> String;
}
