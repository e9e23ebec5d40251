//! S3-backed object store.
//!
//! Uploads are re-encoded to PNG regardless of the input encoding, so
//! the bucket only ever holds one image format, and stored under a
//! generated key below a fixed prefix.

use std::io::Cursor;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use image::ImageFormat;
use uuid::Uuid;

use crate::{ObjectStore, ObjectStoreError};

/// Settings for the S3 object store. Credentials and region come from
/// the standard AWS provider chain, not from here.
#[derive(Debug, Clone)]
pub struct S3Config {
    /// Destination bucket.
    pub bucket: String,
    /// Key prefix within the bucket ("folder").
    pub prefix: String,
    /// Public base URL stored keys are reachable under, without a
    /// trailing slash (e.g. a CDN or website-endpoint URL).
    pub public_base_url: String,
}

#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
    config: S3Config,
}

impl S3ObjectStore {
    pub fn new(client: Client, config: S3Config) -> Self {
        Self { client, config }
    }

    /// Build a store using the ambient AWS configuration.
    pub async fn connect(config: S3Config) -> Self {
        let sdk_config = aws_config::load_from_env().await;
        Self::new(Client::new(&sdk_config), config)
    }
}

/// Decode `data` and re-encode it as PNG.
fn transcode_to_png(data: &[u8]) -> Result<Vec<u8>, ObjectStoreError> {
    let decoded = image::load_from_memory(data)?;
    let mut buf = Cursor::new(Vec::new());
    decoded.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, _original_name: &str, data: &[u8]) -> Result<String, ObjectStoreError> {
        // The key is fully generated; the original name does not even
        // contribute an extension since the format is forced to PNG.
        let key = format!("{}/{}.png", self.config.prefix, Uuid::new_v4());
        let body = transcode_to_png(data)?;

        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(&key)
            .content_type("image/png")
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| ObjectStoreError::Upload(e.to_string()))?;

        tracing::debug!(bucket = %self.config.bucket, %key, "Uploaded object to S3");
        Ok(format!("{}/{key}", self.config.public_base_url))
    }
}
