//! Product image upload and removal.

use std::sync::Arc;

use bytes::Bytes;
use image::ImageFormat;
use tracing::{info, warn};
use uuid::Uuid;

use storefront_cache::CatalogCache;
use storefront_core::config::StorageConfig;
use storefront_core::error::AppError;
use storefront_core::traits::storage::ImageStore;
use storefront_core::types::{ProductId, ProductImageId};
use storefront_database::repositories::ProductStore;
use storefront_entity::product::{NewProductImage, ProductImage};

/// An uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Original file name, for logging only.
    pub file_name: Option<String>,
    /// Raw file content.
    pub data: Bytes,
}

/// Stores product images and keeps their records in sync.
#[derive(Clone)]
pub struct ImageService {
    /// Product store.
    products: Arc<dyn ProductStore>,
    /// Object storage.
    store: Arc<dyn ImageStore>,
    /// Upload limits and accepted formats.
    config: StorageConfig,
    /// Query cache.
    cache: CatalogCache,
}

impl std::fmt::Debug for ImageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageService")
            .field("provider", &self.store.provider_type())
            .finish()
    }
}

impl ImageService {
    /// Creates a new image service.
    pub fn new(
        products: Arc<dyn ProductStore>,
        store: Arc<dyn ImageStore>,
        config: StorageConfig,
        cache: CatalogCache,
    ) -> Self {
        Self {
            products,
            store,
            config,
            cache,
        }
    }

    /// Validate, store, and attach an image to the end of a product's gallery.
    ///
    /// The format is detected from the file content, not the file name.
    pub async fn upload(
        &self,
        product_id: ProductId,
        upload: ImageUpload,
    ) -> Result<ProductImage, AppError> {
        if upload.data.is_empty() {
            return Err(AppError::validation("Uploaded image is empty"));
        }
        if upload.data.len() as u64 > self.config.max_image_size_bytes {
            return Err(AppError::validation(format!(
                "Image exceeds maximum size of {} bytes",
                self.config.max_image_size_bytes
            )));
        }

        let format = self.detect_format(&upload.data)?;
        if self.products.find_by_id(product_id).await?.is_none() {
            return Err(AppError::not_found(format!("Product {product_id} not found")));
        }

        let extension = format.extensions_str().first().copied().unwrap_or("bin");
        let key = format!("products/{product_id}/{}.{extension}", Uuid::new_v4());
        let stored = self
            .store
            .put(&key, upload.data, format.to_mime_type())
            .await?;

        let record = NewProductImage {
            product_id,
            url: stored.url.clone(),
            storage_key: stored.key.clone(),
            position: self.products.next_image_position(product_id).await?,
        };
        let image = match self.products.add_image(&record).await {
            Ok(image) => image,
            Err(e) => {
                if let Err(cleanup) = self.store.delete(&stored.key).await {
                    warn!(key = %stored.key, error = %cleanup, "Failed to remove orphaned image");
                }
                return Err(e);
            }
        };
        self.cache.invalidate_products().await;

        info!(
            product_id = %product_id,
            image_id = %image.id,
            key = %stored.key,
            bytes = stored.size_bytes,
            file_name = upload.file_name.as_deref().unwrap_or(""),
            "Product image uploaded"
        );
        Ok(image)
    }

    /// Remove an image record, then its stored object.
    pub async fn delete(
        &self,
        product_id: ProductId,
        image_id: ProductImageId,
    ) -> Result<(), AppError> {
        let image = self
            .products
            .delete_image(product_id, image_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Image {image_id} not found on product {product_id}"
                ))
            })?;
        self.cache.invalidate_products().await;

        if let Err(e) = self.store.delete(&image.storage_key).await {
            warn!(key = %image.storage_key, error = %e, "Failed to delete stored image");
        }

        info!(product_id = %product_id, image_id = %image_id, "Product image deleted");
        Ok(())
    }

    fn detect_format(&self, data: &[u8]) -> Result<ImageFormat, AppError> {
        let format = image::guess_format(data)
            .map_err(|_| AppError::validation("Uploaded file is not a recognized image"))?;

        let allowed = format.extensions_str().iter().any(|ext| {
            self.config
                .allowed_image_formats
                .iter()
                .any(|a| a.eq_ignore_ascii_case(ext))
        });
        if !allowed {
            return Err(AppError::validation(format!(
                "Image format {format:?} is not accepted; allowed: {}",
                self.config.allowed_image_formats.join(", ")
            )));
        }
        Ok(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::error::ErrorKind;
    use storefront_database::repositories::memory::{MemoryProductStore, product_row};
    use storefront_storage::providers::LocalImageStore;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const BMP: &[u8] = b"BM\0\0\0\0\0\0\0\0";

    struct Fixture {
        service: ImageService,
        products: Arc<dyn ProductStore>,
        store: Arc<dyn ImageStore>,
        _dir: tempfile::TempDir,
    }

    async fn fixture(max_image_size_bytes: u64) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let store: Arc<dyn ImageStore> =
            Arc::new(LocalImageStore::new(dir.path(), "/images").await.unwrap());
        let products: Arc<dyn ProductStore> =
            Arc::new(MemoryProductStore::with_rows(vec![product_row(7, "mug", 1, 800)]));
        let config = StorageConfig {
            max_image_size_bytes,
            ..StorageConfig::default()
        };
        Fixture {
            service: ImageService::new(
                Arc::clone(&products),
                Arc::clone(&store),
                config,
                CatalogCache::disabled(),
            ),
            products,
            store,
            _dir: dir,
        }
    }

    fn upload(data: &'static [u8]) -> ImageUpload {
        ImageUpload {
            file_name: Some("photo".into()),
            data: Bytes::from_static(data),
        }
    }

    #[tokio::test]
    async fn test_upload_appends_in_order() {
        let f = fixture(1024).await;
        let first = f.service.upload(ProductId::new(7), upload(PNG)).await.unwrap();
        let second = f.service.upload(ProductId::new(7), upload(PNG)).await.unwrap();

        assert_eq!(first.position, 0);
        assert_eq!(second.position, 1);
        assert!(first.storage_key.starts_with("products/7/"));
        assert!(first.storage_key.ends_with(".png"));
        assert!(first.url.starts_with("/images/products/7/"));
        assert!(f.store.exists(&first.storage_key).await.unwrap());

        let product = f.products.find_by_id(ProductId::new(7)).await.unwrap().unwrap();
        assert_eq!(product.images.len(), 2);
    }

    #[tokio::test]
    async fn test_rejects_oversized_and_unknown_and_disallowed() {
        let f = fixture(8).await;
        let too_big = f.service.upload(ProductId::new(7), upload(PNG)).await.unwrap_err();
        assert_eq!(too_big.kind, ErrorKind::Validation);

        let f = fixture(1024).await;
        let garbage = f
            .service
            .upload(ProductId::new(7), upload(b"not an image"))
            .await
            .unwrap_err();
        assert_eq!(garbage.kind, ErrorKind::Validation);

        let bmp = f.service.upload(ProductId::new(7), upload(BMP)).await.unwrap_err();
        assert_eq!(bmp.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_upload_to_missing_product() {
        let f = fixture(1024).await;
        let err = f.service.upload(ProductId::new(99), upload(PNG)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_removes_record_and_object() {
        let f = fixture(1024).await;
        let image = f.service.upload(ProductId::new(7), upload(PNG)).await.unwrap();

        f.service.delete(ProductId::new(7), image.id).await.unwrap();
        assert!(!f.store.exists(&image.storage_key).await.unwrap());

        let again = f.service.delete(ProductId::new(7), image.id).await.unwrap_err();
        assert_eq!(again.kind, ErrorKind::NotFound);
    }
}
