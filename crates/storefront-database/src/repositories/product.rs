//! PostgreSQL product repository.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use storefront_core::error::{AppError, ErrorKind};
use storefront_core::result::AppResult;
use storefront_core::types::{CategoryId, ProductId, ProductImageId};
use storefront_entity::product::{
    CreateProduct, NewProductImage, Product, ProductImage, ProductQuery, ProductWithImages,
    UpdateProduct,
};

use super::ProductStore;

/// Repository for products and their images.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load images for a batch of products, grouped by product.
    async fn images_for(
        &self,
        product_ids: &[ProductId],
    ) -> AppResult<HashMap<ProductId, Vec<ProductImage>>> {
        if product_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let ids: Vec<i64> = product_ids.iter().map(|id| id.get()).collect();
        let rows = sqlx::query_as::<_, ProductImage>(
            "SELECT * FROM product_images WHERE product_id = ANY($1) \
             ORDER BY product_id, position ASC, id ASC",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Upstream, "Failed to load product images", e))?;

        let mut grouped: HashMap<ProductId, Vec<ProductImage>> = HashMap::new();
        for image in rows {
            grouped.entry(image.product_id).or_default().push(image);
        }
        Ok(grouped)
    }

    /// Attach images to a list of product rows, preserving row order.
    async fn with_images(&self, products: Vec<Product>) -> AppResult<Vec<ProductWithImages>> {
        let ids: Vec<ProductId> = products.iter().map(|p| p.id).collect();
        let mut images = self.images_for(&ids).await?;

        Ok(products
            .into_iter()
            .map(|product| ProductWithImages {
                images: images.remove(&product.id).unwrap_or_default(),
                product,
            })
            .collect())
    }

    async fn find_one(&self, column: &str, value: FindKey<'_>) -> AppResult<Option<ProductWithImages>> {
        let sql = format!("SELECT * FROM products WHERE {column} = $1");
        let query = sqlx::query_as::<_, Product>(&sql);
        let query = match value {
            FindKey::Id(id) => query.bind(id),
            FindKey::Slug(slug) => query.bind(slug),
        };

        let product = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Upstream, "Failed to find product", e))?;

        match product {
            Some(product) => Ok(self.with_images(vec![product]).await?.pop()),
            None => Ok(None),
        }
    }
}

enum FindKey<'a> {
    Id(ProductId),
    Slug(&'a str),
}

/// Append the WHERE clauses shared by listing and counting.
fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &ProductQuery) {
    qb.push(" WHERE TRUE");

    if let Some(ids) = &query.category_ids {
        let ids: Vec<i64> = ids.iter().map(|id| id.get()).collect();
        qb.push(" AND category_id = ANY(").push_bind(ids).push(")");
    }
    if let Some(min) = query.price.min {
        qb.push(" AND price >= ").push_bind(min);
    }
    if let Some(max) = query.price.max {
        qb.push(" AND price <= ").push_bind(max);
    }
    if let Some(term) = query.search_term() {
        let pattern = format!("%{}%", escape_like(term));
        qb.push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if query.featured_only {
        qb.push(" AND featured");
    }
}

/// Escape `LIKE` metacharacters so user input matches literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn map_write_error(e: sqlx::Error, slug: &str, action: &str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("products_slug_key") => {
            AppError::conflict(format!("Product slug '{slug}' already exists"))
        }
        sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
            AppError::validation("Category does not exist")
        }
        sqlx::Error::Database(ref db_err) if db_err.is_check_violation() => {
            AppError::validation("Price and inventory must be non-negative")
        }
        _ => AppError::with_source(ErrorKind::Upstream, format!("Failed to {action} product"), e),
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn list(&self, query: &ProductQuery) -> AppResult<Vec<ProductWithImages>> {
        if query.is_trivially_empty() {
            return Ok(Vec::new());
        }

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM products");
        push_filters(&mut qb, query);
        qb.push(" ORDER BY created_at DESC, id DESC");
        if let Some(limit) = query.limit {
            qb.push(" LIMIT ").push_bind(limit as i64);
        }
        if query.offset > 0 {
            let offset = i64::try_from(query.offset)
                .map_err(|_| AppError::validation("Listing offset is out of range"))?;
            qb.push(" OFFSET ").push_bind(offset);
        }

        let products = qb
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Upstream, "Failed to list products", e))?;

        self.with_images(products).await
    }

    async fn count(&self, query: &ProductQuery) -> AppResult<u64> {
        if matches!(&query.category_ids, Some(ids) if ids.is_empty()) {
            return Ok(0);
        }

        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products");
        push_filters(&mut qb, query);

        let count: i64 = qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Upstream, "Failed to count products", e))?;
        Ok(count as u64)
    }

    async fn find_by_id(&self, id: ProductId) -> AppResult<Option<ProductWithImages>> {
        self.find_one("id", FindKey::Id(id)).await
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<ProductWithImages>> {
        self.find_one("slug", FindKey::Slug(slug)).await
    }

    async fn count_in_category(&self, category_id: CategoryId) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE category_id = $1")
            .bind(category_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Upstream, "Failed to count category products", e)
            })?;
        Ok(count as u64)
    }

    async fn create(&self, data: &CreateProduct) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(
            "INSERT INTO products (name, slug, description, price, inventory, featured, category_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.slug)
        .bind(&data.description)
        .bind(data.price)
        .bind(data.inventory)
        .bind(data.featured)
        .bind(data.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &data.slug, "create"))
    }

    async fn update(&self, id: ProductId, data: &UpdateProduct) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(
            "UPDATE products SET name = $2, slug = $3, description = $4, price = $5, \
             inventory = $6, featured = $7, category_id = $8, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.slug)
        .bind(&data.description)
        .bind(data.price)
        .bind(data.inventory)
        .bind(data.featured)
        .bind(data.category_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &data.slug, "update"))?
        .ok_or_else(|| AppError::not_found(format!("Product {id} not found")))
    }

    async fn delete(&self, id: ProductId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Upstream, "Failed to delete product", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn add_image(&self, data: &NewProductImage) -> AppResult<ProductImage> {
        sqlx::query_as::<_, ProductImage>(
            "INSERT INTO product_images (product_id, url, storage_key, position) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.product_id)
        .bind(&data.url)
        .bind(&data.storage_key)
        .bind(data.position)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found(format!("Product {} not found", data.product_id))
            }
            _ => AppError::with_source(ErrorKind::Upstream, "Failed to add product image", e),
        })
    }

    async fn delete_image(
        &self,
        product_id: ProductId,
        image_id: ProductImageId,
    ) -> AppResult<Option<ProductImage>> {
        sqlx::query_as::<_, ProductImage>(
            "DELETE FROM product_images WHERE id = $1 AND product_id = $2 RETURNING *",
        )
        .bind(image_id)
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Upstream, "Failed to delete product image", e))
    }

    async fn next_image_position(&self, product_id: ProductId) -> AppResult<i32> {
        sqlx::query_scalar::<_, i32>(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM product_images WHERE product_id = $1",
        )
        .bind(product_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Upstream, "Failed to read image positions", e))
    }
}
