//! Local-disk object store.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::{object_key, ObjectStore, ObjectStoreError};

/// Stores uploads under a local directory and returns `/uploads/<key>`
/// locations, which the HTTP server serves statically.
#[derive(Debug, Clone)]
pub struct LocalDiskStore {
    root: PathBuf,
}

/// URL prefix the API mounts the upload directory under.
pub const PUBLIC_PREFIX: &str = "/uploads";

impl LocalDiskStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory uploads are written to.
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

#[async_trait]
impl ObjectStore for LocalDiskStore {
    async fn put(&self, original_name: &str, data: &[u8]) -> Result<String, ObjectStoreError> {
        let key = object_key(original_name);
        tokio::fs::create_dir_all(&self.root).await?;
        let dest = self.root.join(&key);
        tokio::fs::write(&dest, data).await?;

        tracing::debug!(path = %dest.display(), bytes = data.len(), "Stored upload on disk");
        Ok(format!("{PUBLIC_PREFIX}/{key}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_writes_file_and_returns_uploads_location() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDiskStore::new(dir.path());

        let location = store.put("cat.png", b"not-really-a-png").await.unwrap();
        assert!(location.starts_with("/uploads/"), "got {location}");
        assert!(location.ends_with(".png"), "got {location}");

        let key = location.strip_prefix("/uploads/").unwrap();
        let bytes = tokio::fs::read(dir.path().join(key)).await.unwrap();
        assert_eq!(bytes, b"not-really-a-png");
    }

    #[tokio::test]
    async fn traversal_names_stay_inside_the_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDiskStore::new(dir.path());

        let location = store.put("../../escape.png", b"x").await.unwrap();
        let key = location.strip_prefix("/uploads/").unwrap();

        // The stored file sits directly under the root.
        assert!(dir.path().join(key).is_file());
        assert!(!key.contains('/'));
    }

    #[tokio::test]
    async fn creates_missing_upload_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/uploads");
        let store = LocalDiskStore::new(&nested);

        store.put("x.jpg", b"jpeg").await.unwrap();
        assert!(nested.is_dir());
    }
}
