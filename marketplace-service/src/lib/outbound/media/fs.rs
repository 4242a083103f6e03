use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::listing::errors::PhotoStoreError;
use crate::domain::listing::ports::PhotoStore;

const ACCEPTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Filesystem-backed photo storage.
///
/// File names are generated from a fresh UUID, never taken from the
/// upload, so callers cannot influence where bytes land.
pub struct FsPhotoStore {
    root: PathBuf,
}

impl FsPhotoStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl PhotoStore for FsPhotoStore {
    async fn save(&self, extension: &str, bytes: Vec<u8>) -> Result<String, PhotoStoreError> {
        let extension = extension.to_ascii_lowercase();
        if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(PhotoStoreError::UnsupportedFormat(extension));
        }

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| PhotoStoreError::WriteFailed(e.to_string()))?;

        let file_name = format!("{}.{}", Uuid::new_v4(), extension);
        let path = self.root.join(&file_name);

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| PhotoStoreError::WriteFailed(e.to_string()))?;

        Ok(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (FsPhotoStore, PathBuf) {
        let dir = std::env::temp_dir().join(format!("photo-store-test-{}", Uuid::new_v4()));
        (FsPhotoStore::new(dir.clone()), dir)
    }

    #[tokio::test]
    async fn test_save_writes_bytes_under_generated_name() {
        let (store, dir) = temp_store();

        let file_name = store
            .save("JPG", vec![0xff, 0xd8, 0xff])
            .await
            .expect("Failed to save photo");

        assert!(file_name.ends_with(".jpg"));
        let written = tokio::fs::read(dir.join(&file_name)).await.unwrap();
        assert_eq!(written, vec![0xff, 0xd8, 0xff]);

        tokio::fs::remove_dir_all(dir).await.ok();
    }

    #[tokio::test]
    async fn test_save_rejects_unsupported_extension() {
        let (store, dir) = temp_store();

        let result = store.save("exe", vec![1, 2, 3]).await;
        assert!(matches!(
            result,
            Err(PhotoStoreError::UnsupportedFormat(_))
        ));

        tokio::fs::remove_dir_all(dir).await.ok();
    }

    #[tokio::test]
    async fn test_save_generates_distinct_names() {
        let (store, dir) = temp_store();

        let first = store.save("png", vec![1]).await.unwrap();
        let second = store.save("png", vec![2]).await.unwrap();
        assert_ne!(first, second);

        tokio::fs::remove_dir_all(dir).await.ok();
    }
}
