//! Object storage trait for product images.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Result of writing an object to storage.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoredObject {
    /// Key within the provider (e.g. `products/12/3f2a….png`).
    pub key: String,
    /// Publicly reachable URL for the object.
    pub url: String,
    /// Size in bytes.
    pub size_bytes: u64,
}

/// Trait for image storage backends.
///
/// Implementations exist for the local filesystem and S3-compatible object
/// stores. The trait lives in `storefront-core` and is implemented in
/// `storefront-storage`.
#[async_trait]
pub trait ImageStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Write an object under `key` with the given content type.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<StoredObject>;

    /// Delete the object under `key`. Deleting a missing object is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check whether an object exists under `key`.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Build the public URL for `key`.
    fn public_url(&self, key: &str) -> String;
}
