//! Image storage selection from configuration.

use std::sync::Arc;

use tracing::info;

use storefront_core::config::StorageConfig;
use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_core::traits::storage::ImageStore;

use crate::providers::LocalImageStore;

/// Handle to the configured image store.
#[derive(Debug, Clone)]
pub struct ImageStorage {
    inner: Arc<dyn ImageStore>,
}

impl ImageStorage {
    /// Create the provider named by `config.provider`.
    pub async fn from_config(config: &StorageConfig) -> AppResult<Self> {
        let inner: Arc<dyn ImageStore> = match config.provider.as_str() {
            "local" => {
                info!(root = %config.local.root_path, "Initializing local image store");
                Arc::new(
                    LocalImageStore::new(&config.local.root_path, &config.local.public_base_url)
                        .await?,
                )
            }
            #[cfg(feature = "s3")]
            "s3" => Arc::new(crate::providers::S3ImageStore::new(&config.s3).await?),
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown storage provider: '{other}'. Supported: {}",
                    supported_providers()
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Wrap an existing store.
    pub fn from_store(store: Arc<dyn ImageStore>) -> Self {
        Self { inner: store }
    }

    /// The underlying store.
    pub fn store(&self) -> Arc<dyn ImageStore> {
        Arc::clone(&self.inner)
    }
}

fn supported_providers() -> &'static str {
    if cfg!(feature = "s3") { "local, s3" } else { "local" }
}
