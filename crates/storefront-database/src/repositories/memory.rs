//! In-memory catalog stores.
//!
//! These mirror the PostgreSQL repositories closely enough to run the service
//! and HTTP layers without a database. Rows can be seeded directly, including
//! rows the database would reject (dangling or cyclic parents), so callers can
//! exercise the defensive paths of the tree logic.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::RwLock;

use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_core::types::{CategoryId, ProductId, ProductImageId};
use storefront_entity::category::{Category, CreateCategory, UpdateCategory};
use storefront_entity::product::{
    CreateProduct, NewProductImage, Product, ProductImage, ProductQuery, ProductWithImages,
    UpdateProduct,
};

use super::{CategoryStore, ProductStore};

/// Build a category row with a deterministic timestamp.
pub fn category_row(id: i64, name: &str, slug: &str, parent_id: Option<i64>) -> Category {
    let at = seeded_timestamp(id);
    Category {
        id: CategoryId::new(id),
        name: name.to_string(),
        slug: slug.to_string(),
        parent_id: parent_id.map(CategoryId::new),
        created_at: at,
        updated_at: at,
    }
}

/// Build a product row. Higher ids are treated as newer.
pub fn product_row(id: i64, slug: &str, category_id: i64, price: i64) -> Product {
    let at = seeded_timestamp(id);
    Product {
        id: ProductId::new(id),
        name: slug.replace('-', " "),
        slug: slug.to_string(),
        description: String::new(),
        price,
        inventory: 10,
        featured: false,
        category_id: CategoryId::new(category_id),
        created_at: at,
        updated_at: at,
    }
}

fn seeded_timestamp(offset_secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + offset_secs, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn unavailable() -> AppError {
    AppError::upstream("Catalog store is unavailable")
}

// -- Categories --------------------------------------------------------------

/// Category store backed by a `Vec` behind an async lock.
#[derive(Debug)]
pub struct MemoryCategoryStore {
    rows: RwLock<Vec<Category>>,
    next_id: AtomicI64,
    offline: AtomicBool,
}

impl MemoryCategoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    /// Create a store seeded with raw rows. Rows are not validated.
    pub fn with_rows(rows: Vec<Category>) -> Self {
        let next = rows.iter().map(|c| c.id.get()).max().unwrap_or(0) + 1;
        Self {
            rows: RwLock::new(rows),
            next_id: AtomicI64::new(next),
            offline: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail with an upstream error.
    pub fn set_unavailable(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> AppResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }

    fn check_write(
        rows: &[Category],
        id: Option<CategoryId>,
        slug: &str,
        parent_id: Option<CategoryId>,
    ) -> AppResult<()> {
        if rows.iter().any(|c| c.slug == slug && Some(c.id) != id) {
            return Err(AppError::conflict(format!(
                "Category slug '{slug}' already exists"
            )));
        }
        if let Some(parent) = parent_id {
            if Some(parent) == id {
                return Err(AppError::validation("A category cannot be its own parent"));
            }
            if !rows.iter().any(|c| c.id == parent) {
                return Err(AppError::validation("Parent category does not exist"));
            }
        }
        Ok(())
    }
}

impl Default for MemoryCategoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CategoryStore for MemoryCategoryStore {
    async fn list_all(&self) -> AppResult<Vec<Category>> {
        self.check_online()?;
        let mut rows = self.rows.read().await.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    async fn find_by_id(&self, id: CategoryId) -> AppResult<Option<Category>> {
        self.check_online()?;
        Ok(self.rows.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Category>> {
        self.check_online()?;
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|c| c.slug == slug)
            .cloned())
    }

    async fn create(&self, data: &CreateCategory) -> AppResult<Category> {
        self.check_online()?;
        let mut rows = self.rows.write().await;
        Self::check_write(&rows, None, &data.slug, data.parent_id)?;

        let now = Utc::now();
        let category = Category {
            id: CategoryId::new(self.next_id.fetch_add(1, Ordering::SeqCst)),
            name: data.name.clone(),
            slug: data.slug.clone(),
            parent_id: data.parent_id,
            created_at: now,
            updated_at: now,
        };
        rows.push(category.clone());
        Ok(category)
    }

    async fn update(&self, id: CategoryId, data: &UpdateCategory) -> AppResult<Category> {
        self.check_online()?;
        let mut rows = self.rows.write().await;
        Self::check_write(&rows, Some(id), &data.slug, data.parent_id)?;

        let row = rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::not_found(format!("Category {id} not found")))?;
        row.name = data.name.clone();
        row.slug = data.slug.clone();
        row.parent_id = data.parent_id;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: CategoryId) -> AppResult<bool> {
        self.check_online()?;
        let mut rows = self.rows.write().await;
        if rows.iter().any(|c| c.parent_id == Some(id)) {
            return Err(AppError::conflict(format!(
                "Category {id} is still referenced by products or subcategories"
            )));
        }
        let before = rows.len();
        rows.retain(|c| c.id != id);
        Ok(rows.len() < before)
    }

    async fn count_children(&self, id: CategoryId) -> AppResult<u64> {
        self.check_online()?;
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .filter(|c| c.parent_id == Some(id))
            .count() as u64)
    }
}

// -- Products ----------------------------------------------------------------

/// Product store holding product and image rows in memory.
#[derive(Debug)]
pub struct MemoryProductStore {
    products: RwLock<Vec<Product>>,
    images: RwLock<Vec<ProductImage>>,
    next_product_id: AtomicI64,
    next_image_id: AtomicI64,
    offline: AtomicBool,
}

impl MemoryProductStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    /// Create a store seeded with raw product rows.
    pub fn with_rows(products: Vec<Product>) -> Self {
        let next = products.iter().map(|p| p.id.get()).max().unwrap_or(0) + 1;
        Self {
            products: RwLock::new(products),
            images: RwLock::new(Vec::new()),
            next_product_id: AtomicI64::new(next),
            next_image_id: AtomicI64::new(1),
            offline: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail with an upstream error.
    pub fn set_unavailable(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> AppResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }

    fn check_write(rows: &[Product], id: Option<ProductId>, data: &CreateProduct) -> AppResult<()> {
        if data.price < 0 || data.inventory < 0 {
            return Err(AppError::validation(
                "Price and inventory must be non-negative",
            ));
        }
        if rows.iter().any(|p| p.slug == data.slug && Some(p.id) != id) {
            return Err(AppError::conflict(format!(
                "Product slug '{}' already exists",
                data.slug
            )));
        }
        Ok(())
    }

    fn matches(product: &Product, query: &ProductQuery, term: Option<&str>) -> bool {
        if let Some(ids) = &query.category_ids {
            if !ids.contains(&product.category_id) {
                return false;
            }
        }
        if !query.price.contains(product.price) {
            return false;
        }
        if query.featured_only && !product.featured {
            return false;
        }
        if let Some(term) = term {
            let haystack = format!("{}\n{}", product.name, product.description).to_lowercase();
            if !haystack.contains(term) {
                return false;
            }
        }
        true
    }

    async fn attach_images(&self, product: Product) -> ProductWithImages {
        let mut images: Vec<ProductImage> = self
            .images
            .read()
            .await
            .iter()
            .filter(|i| i.product_id == product.id)
            .cloned()
            .collect();
        images.sort_by_key(|i| (i.position, i.id));
        ProductWithImages { product, images }
    }

    async fn filtered(&self, query: &ProductQuery) -> Vec<Product> {
        let term = query.search_term().map(str::to_lowercase);
        let mut rows: Vec<Product> = self
            .products
            .read()
            .await
            .iter()
            .filter(|p| Self::matches(p, query, term.as_deref()))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        rows
    }
}

impl Default for MemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list(&self, query: &ProductQuery) -> AppResult<Vec<ProductWithImages>> {
        self.check_online()?;
        if query.is_trivially_empty() {
            return Ok(Vec::new());
        }

        let rows = self.filtered(query).await;
        let limit = query.limit.map_or(usize::MAX, |l| l as usize);

        let mut result = Vec::new();
        for product in rows.into_iter().skip(query.offset as usize).take(limit) {
            result.push(self.attach_images(product).await);
        }
        Ok(result)
    }

    async fn count(&self, query: &ProductQuery) -> AppResult<u64> {
        self.check_online()?;
        if matches!(&query.category_ids, Some(ids) if ids.is_empty()) {
            return Ok(0);
        }
        Ok(self.filtered(query).await.len() as u64)
    }

    async fn find_by_id(&self, id: ProductId) -> AppResult<Option<ProductWithImages>> {
        self.check_online()?;
        let product = self
            .products
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned();
        match product {
            Some(product) => Ok(Some(self.attach_images(product).await)),
            None => Ok(None),
        }
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<ProductWithImages>> {
        self.check_online()?;
        let product = self
            .products
            .read()
            .await
            .iter()
            .find(|p| p.slug == slug)
            .cloned();
        match product {
            Some(product) => Ok(Some(self.attach_images(product).await)),
            None => Ok(None),
        }
    }

    async fn count_in_category(&self, category_id: CategoryId) -> AppResult<u64> {
        self.check_online()?;
        Ok(self
            .products
            .read()
            .await
            .iter()
            .filter(|p| p.category_id == category_id)
            .count() as u64)
    }

    async fn create(&self, data: &CreateProduct) -> AppResult<Product> {
        self.check_online()?;
        let mut rows = self.products.write().await;
        Self::check_write(&rows, None, data)?;

        let now = Utc::now();
        let product = Product {
            id: ProductId::new(self.next_product_id.fetch_add(1, Ordering::SeqCst)),
            name: data.name.clone(),
            slug: data.slug.clone(),
            description: data.description.clone(),
            price: data.price,
            inventory: data.inventory,
            featured: data.featured,
            category_id: data.category_id,
            created_at: now,
            updated_at: now,
        };
        rows.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: ProductId, data: &UpdateProduct) -> AppResult<Product> {
        self.check_online()?;
        let mut rows = self.products.write().await;
        Self::check_write(&rows, Some(id), data)?;

        let row = rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found(format!("Product {id} not found")))?;
        row.name = data.name.clone();
        row.slug = data.slug.clone();
        row.description = data.description.clone();
        row.price = data.price;
        row.inventory = data.inventory;
        row.featured = data.featured;
        row.category_id = data.category_id;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: ProductId) -> AppResult<bool> {
        self.check_online()?;
        let mut rows = self.products.write().await;
        let before = rows.len();
        rows.retain(|p| p.id != id);
        let removed = rows.len() < before;
        if removed {
            self.images.write().await.retain(|i| i.product_id != id);
        }
        Ok(removed)
    }

    async fn add_image(&self, data: &NewProductImage) -> AppResult<ProductImage> {
        self.check_online()?;
        if !self
            .products
            .read()
            .await
            .iter()
            .any(|p| p.id == data.product_id)
        {
            return Err(AppError::not_found(format!(
                "Product {} not found",
                data.product_id
            )));
        }

        let image = ProductImage {
            id: ProductImageId::new(self.next_image_id.fetch_add(1, Ordering::SeqCst)),
            product_id: data.product_id,
            url: data.url.clone(),
            storage_key: data.storage_key.clone(),
            position: data.position,
            created_at: Utc::now(),
        };
        self.images.write().await.push(image.clone());
        Ok(image)
    }

    async fn delete_image(
        &self,
        product_id: ProductId,
        image_id: ProductImageId,
    ) -> AppResult<Option<ProductImage>> {
        self.check_online()?;
        let mut images = self.images.write().await;
        let index = images
            .iter()
            .position(|i| i.id == image_id && i.product_id == product_id);
        Ok(index.map(|i| images.remove(i)))
    }

    async fn next_image_position(&self, product_id: ProductId) -> AppResult<i32> {
        self.check_online()?;
        Ok(self
            .images
            .read()
            .await
            .iter()
            .filter(|i| i.product_id == product_id)
            .map(|i| i.position + 1)
            .max()
            .unwrap_or(0))
    }
}
