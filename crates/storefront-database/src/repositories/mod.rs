//! Catalog store contracts and their implementations.
//!
//! Services depend on the [`CategoryStore`] and [`ProductStore`] traits so
//! they can run against PostgreSQL in production and the in-memory stores in
//! tests.

pub mod category;
pub mod memory;
pub mod product;

use async_trait::async_trait;

use storefront_core::result::AppResult;
use storefront_core::types::{CategoryId, ProductId, ProductImageId};
use storefront_entity::category::{Category, CreateCategory, UpdateCategory};
use storefront_entity::product::{
    CreateProduct, NewProductImage, Product, ProductImage, ProductQuery, ProductWithImages,
    UpdateProduct,
};

pub use category::CategoryRepository;
pub use memory::{MemoryCategoryStore, MemoryProductStore};
pub use product::ProductRepository;

/// Flat access to category rows.
#[async_trait]
pub trait CategoryStore: Send + Sync + std::fmt::Debug + 'static {
    /// Every category, ordered by name.
    async fn list_all(&self) -> AppResult<Vec<Category>>;

    /// Find a category by ID.
    async fn find_by_id(&self, id: CategoryId) -> AppResult<Option<Category>>;

    /// Find a category by slug.
    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Category>>;

    /// Insert a category. Duplicate slugs yield a conflict.
    async fn create(&self, data: &CreateCategory) -> AppResult<Category>;

    /// Replace a category's editable fields.
    async fn update(&self, id: CategoryId, data: &UpdateCategory) -> AppResult<Category>;

    /// Delete a category. Returns `true` if a row was removed.
    async fn delete(&self, id: CategoryId) -> AppResult<bool>;

    /// Count direct children of a category.
    async fn count_children(&self, id: CategoryId) -> AppResult<u64>;
}

/// Product rows joined with their images.
#[async_trait]
pub trait ProductStore: Send + Sync + std::fmt::Debug + 'static {
    /// Products matching `query`, newest first, with images attached.
    async fn list(&self, query: &ProductQuery) -> AppResult<Vec<ProductWithImages>>;

    /// Number of products matching `query`, ignoring limit/offset.
    async fn count(&self, query: &ProductQuery) -> AppResult<u64>;

    /// Find a product by ID.
    async fn find_by_id(&self, id: ProductId) -> AppResult<Option<ProductWithImages>>;

    /// Find a product by slug.
    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<ProductWithImages>>;

    /// Count products that reference a category directly.
    async fn count_in_category(&self, category_id: CategoryId) -> AppResult<u64>;

    /// Insert a product. Duplicate slugs yield a conflict.
    async fn create(&self, data: &CreateProduct) -> AppResult<Product>;

    /// Replace a product's editable fields.
    async fn update(&self, id: ProductId, data: &UpdateProduct) -> AppResult<Product>;

    /// Delete a product and, by cascade, its image rows.
    async fn delete(&self, id: ProductId) -> AppResult<bool>;

    /// Attach an image row to a product.
    async fn add_image(&self, data: &NewProductImage) -> AppResult<ProductImage>;

    /// Remove one image row. Returns the removed row.
    async fn delete_image(
        &self,
        product_id: ProductId,
        image_id: ProductImageId,
    ) -> AppResult<Option<ProductImage>>;

    /// Position for the next appended image.
    async fn next_image_position(&self, product_id: ProductId) -> AppResult<i32>;
}
