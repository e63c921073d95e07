//! Product detail and administration.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use storefront_cache::CatalogCache;
use storefront_core::error::AppError;
use storefront_core::traits::storage::ImageStore;
use storefront_core::types::{CategoryId, ProductId};
use storefront_database::repositories::{CategoryStore, ProductStore};
use storefront_entity::category::Category;
use storefront_entity::product::{CreateProduct, Product, ProductWithImages};

use crate::category::CategoryService;
use crate::category::service::{resolve_slug, validate_name};

/// A product page: the product, its images, and where it sits in the tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetail {
    /// Product with images.
    #[serde(flatten)]
    pub product: ProductWithImages,
    /// Owning category, if it still resolves.
    pub category: Option<Category>,
    /// Root-first path ending with the owning category.
    pub breadcrumbs: Vec<Category>,
}

/// Admin input for creating or replacing a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInput {
    /// Display name.
    pub name: String,
    /// URL slug. Derived from the name on create when absent; kept on update.
    pub slug: Option<String>,
    /// Long-form description.
    pub description: String,
    /// Price in minor units.
    pub price: i64,
    /// Units in stock.
    pub inventory: i32,
    /// Featured flag.
    pub featured: bool,
    /// Owning category.
    pub category_id: CategoryId,
}

/// Product reads and admin writes.
#[derive(Debug, Clone)]
pub struct ProductService {
    /// Product store.
    products: Arc<dyn ProductStore>,
    /// Category store, for existence checks.
    categories: Arc<dyn CategoryStore>,
    /// Category resolution, for breadcrumbs.
    category_service: Arc<CategoryService>,
    /// Image storage, for cleanup on delete.
    images: Arc<dyn ImageStore>,
    /// Query cache.
    cache: CatalogCache,
}

impl ProductService {
    /// Creates a new product service.
    pub fn new(
        products: Arc<dyn ProductStore>,
        categories: Arc<dyn CategoryStore>,
        category_service: Arc<CategoryService>,
        images: Arc<dyn ImageStore>,
        cache: CatalogCache,
    ) -> Self {
        Self {
            products,
            categories,
            category_service,
            images,
            cache,
        }
    }

    /// Gets a product with images by ID.
    pub async fn get(&self, id: ProductId) -> Result<ProductWithImages, AppError> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {id} not found")))
    }

    /// Product page by slug, with category breadcrumbs.
    pub async fn get_by_slug(&self, slug: &str) -> Result<ProductDetail, AppError> {
        let (product, index) = tokio::try_join!(
            async {
                self.products
                    .find_by_slug(slug)
                    .await?
                    .ok_or_else(|| AppError::not_found(format!("Product '{slug}' not found")))
            },
            self.category_service.index(),
        )?;

        let category = index.get(product.product.category_id).cloned();
        let breadcrumbs = match &category {
            Some(category) => {
                let mut path = index.ancestor_path(category);
                path.push(category.clone());
                path
            }
            None => Vec::new(),
        };

        Ok(ProductDetail {
            product,
            category,
            breadcrumbs,
        })
    }

    /// Creates a new product.
    pub async fn create(&self, input: ProductInput) -> Result<Product, AppError> {
        let data = self.validate(input, None).await?;
        let product = self.products.create(&data).await?;
        self.cache.invalidate_products().await;

        info!(
            product_id = %product.id,
            slug = %product.slug,
            category_id = %product.category_id,
            "Product created"
        );
        Ok(product)
    }

    /// Replaces a product's editable fields.
    pub async fn update(&self, id: ProductId, input: ProductInput) -> Result<Product, AppError> {
        let existing = self.get(id).await?;
        let data = self.validate(input, Some(&existing.product)).await?;
        let product = self.products.update(id, &data).await?;
        self.cache.invalidate_products().await;

        info!(product_id = %id, slug = %product.slug, "Product updated");
        Ok(product)
    }

    /// Deletes a product, its image records, and then its stored images.
    ///
    /// Stored objects that fail to delete are logged and left behind.
    pub async fn delete(&self, id: ProductId) -> Result<(), AppError> {
        let existing = self.get(id).await?;
        if !self.products.delete(id).await? {
            return Err(AppError::not_found(format!("Product {id} not found")));
        }
        self.cache.invalidate_products().await;

        for image in &existing.images {
            if let Err(e) = self.images.delete(&image.storage_key).await {
                warn!(
                    product_id = %id,
                    key = %image.storage_key,
                    error = %e,
                    "Failed to delete stored image"
                );
            }
        }

        info!(
            product_id = %id,
            slug = %existing.product.slug,
            images = existing.images.len(),
            "Product deleted"
        );
        Ok(())
    }

    async fn validate(
        &self,
        input: ProductInput,
        existing: Option<&Product>,
    ) -> Result<CreateProduct, AppError> {
        let name = validate_name(&input.name)?;
        let slug = match (input.slug.as_deref(), existing) {
            (None, Some(existing)) => existing.slug.clone(),
            (raw, _) => resolve_slug(raw, &name)?,
        };

        if input.price < 0 {
            return Err(AppError::validation("Price cannot be negative"));
        }
        if input.inventory < 0 {
            return Err(AppError::validation("Inventory cannot be negative"));
        }
        if self.categories.find_by_id(input.category_id).await?.is_none() {
            return Err(AppError::validation(format!(
                "Category {} does not exist",
                input.category_id
            )));
        }

        Ok(CreateProduct {
            name,
            slug,
            description: input.description.trim().to_string(),
            price: input.price,
            inventory: input.inventory,
            featured: input.featured,
            category_id: input.category_id,
        })
    }
}
