//! Object storage for cover images.
//!
//! A single capability abstraction, `store(bytes) -> location`, with a
//! local-disk implementation (served back via `/uploads`) and an S3
//! implementation, selected by configuration at startup.

pub mod local;
pub mod s3;

pub use local::LocalDiskStore;
pub use s3::S3ObjectStore;

use async_trait::async_trait;
use uuid::Uuid;

/// Errors surfaced by an [`ObjectStore`]. All of them are server-side
/// failures; the API layer maps every variant to a 500.
#[derive(Debug, thiserror::Error)]
pub enum ObjectStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid image payload: {0}")]
    Image(#[from] image::ImageError),

    #[error("Upload failed: {0}")]
    Upload(String),
}

/// Persist uploaded binaries and hand back a serveable location.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `data` and return its location: a local path under
    /// `/uploads` or a public URL, depending on the implementation.
    ///
    /// `original_name` is the client-supplied filename. It only
    /// contributes its extension; the stored key is always generated,
    /// so colliding or path-traversing names cannot reach the backend.
    async fn put(&self, original_name: &str, data: &[u8]) -> Result<String, ObjectStoreError>;
}

/// Longest extension carried over from the client filename.
const MAX_EXTENSION_LEN: usize = 8;

/// Build a generated storage key from a client filename.
///
/// The key is a fresh UUID plus the lower-cased, alphanumeric-only
/// extension of `original_name` (or `bin` when there is none), so the
/// client name can never collide with or escape the storage root.
pub fn object_key(original_name: &str) -> String {
    let ext: String = original_name
        .rsplit('.')
        .next()
        .unwrap_or("")
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(MAX_EXTENSION_LEN)
        .collect::<String>()
        .to_ascii_lowercase();

    let ext = if ext.is_empty() || !original_name.contains('.') {
        "bin".to_string()
    } else {
        ext
    };

    format!("{}.{ext}", Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::object_key;

    #[test]
    fn key_keeps_a_sanitized_extension() {
        let key = object_key("photo.PNG");
        assert!(key.ends_with(".png"), "got {key}");
    }

    #[test]
    fn key_never_contains_path_separators() {
        let key = object_key("../../etc/passwd.png");
        assert!(!key.contains('/'), "got {key}");
        assert!(!key.contains(".."), "got {key}");
    }

    #[test]
    fn extensionless_names_fall_back_to_bin() {
        assert!(object_key("CON").ends_with(".bin"));
        assert!(object_key("").ends_with(".bin"));
    }

    #[test]
    fn keys_are_unique_per_call() {
        assert_ne!(object_key("a.png"), object_key("a.png"));
    }
}
