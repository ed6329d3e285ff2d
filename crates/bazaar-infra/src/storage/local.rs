//! Local filesystem image storage.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use bazaar_core::error::StorageError;
use bazaar_core::ports::{ImageStorage, ImageUpload};

/// Directory under the media root that holds ad images.
const UPLOAD_DIR: &str = "ads";

/// Stores images under `root/ads/` and serves them from `base_url`.
pub struct LocalImageStorage {
    root: PathBuf,
    base_url: String,
}

impl LocalImageStorage {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Reduce a client-supplied file name to a safe single path component.
///
/// Directory parts are dropped, spaces become underscores and anything other
/// than alphanumerics, `-`, `_` and `.` is removed.
fn valid_file_name(raw: &str) -> Option<String> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw).trim();
    let cleaned: String = base
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .collect();

    match cleaned.as_str() {
        "" | "." | ".." => None,
        _ => Some(cleaned),
    }
}

#[async_trait]
impl ImageStorage for LocalImageStorage {
    async fn store(&self, upload: ImageUpload) -> Result<String, StorageError> {
        let name = valid_file_name(&upload.filename)
            .ok_or_else(|| StorageError::InvalidName(upload.filename.clone()))?;

        let dir = self.root.join(UPLOAD_DIR);
        fs::create_dir_all(&dir).await?;

        // A random prefix keeps names unique; create_new refuses to overwrite.
        let unique = format!("{}_{}", Uuid::new_v4().simple(), name);
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(dir.join(&unique))
            .await?;
        file.write_all(&upload.bytes).await?;
        file.flush().await?;

        let relative = format!("{UPLOAD_DIR}/{unique}");
        tracing::debug!(path = %relative, bytes = upload.bytes.len(), "Stored image");
        Ok(relative)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names_are_sanitized() {
        assert_eq!(valid_file_name("photo.jpg").as_deref(), Some("photo.jpg"));
        assert_eq!(valid_file_name("../../etc/passwd").as_deref(), Some("passwd"));
        assert_eq!(valid_file_name("C:\\pics\\my cat.png").as_deref(), Some("my_cat.png"));
        assert_eq!(valid_file_name("фото (1).jpg").as_deref(), Some("фото_1.jpg"));
        assert_eq!(valid_file_name(".."), None);
        assert_eq!(valid_file_name("   "), None);
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let storage = LocalImageStorage::new("media", "/media/");
        assert_eq!(storage.url("ads/a.jpg"), "/media/ads/a.jpg");

        let storage = LocalImageStorage::new("media", "https://cdn.example.com/media");
        assert_eq!(storage.url("ads/a.jpg"), "https://cdn.example.com/media/ads/a.jpg");
    }

    #[tokio::test]
    async fn test_store_writes_unique_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalImageStorage::new(dir.path(), "/media/");

        let upload = ImageUpload {
            filename: "bike.jpg".to_string(),
            bytes: b"jpeg-bytes".to_vec(),
        };
        let first = storage.store(upload.clone()).await.unwrap();
        let second = storage.store(upload).await.unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with("ads/") && first.ends_with("_bike.jpg"));
        let written = std::fs::read(storage.root().join(&first)).unwrap();
        assert_eq!(written, b"jpeg-bytes");
    }

    #[tokio::test]
    async fn test_store_rejects_unusable_name() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalImageStorage::new(dir.path(), "/media/");

        let err = storage
            .store(ImageUpload {
                filename: "/".to_string(),
                bytes: vec![1],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidName(_)));
    }
}
