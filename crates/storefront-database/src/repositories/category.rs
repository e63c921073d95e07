//! PostgreSQL category repository.

use async_trait::async_trait;
use sqlx::PgPool;

use storefront_core::error::{AppError, ErrorKind};
use storefront_core::result::AppResult;
use storefront_core::types::CategoryId;
use storefront_entity::category::{Category, CreateCategory, UpdateCategory};

use super::CategoryStore;

/// Repository for category CRUD over the `categories` table.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Create a new category repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map write errors, translating known constraints into domain errors.
fn map_write_error(e: sqlx::Error, slug: &str, action: &str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("categories_slug_key") => {
            AppError::conflict(format!("Category slug '{slug}' already exists"))
        }
        sqlx::Error::Database(ref db_err)
            if db_err.constraint() == Some("categories_not_own_parent") =>
        {
            AppError::validation("A category cannot be its own parent")
        }
        sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
            AppError::validation("Parent category does not exist")
        }
        _ => AppError::with_source(ErrorKind::Upstream, format!("Failed to {action} category"), e),
    }
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn list_all(&self) -> AppResult<Vec<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name ASC, id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Upstream, "Failed to list categories", e))
    }

    async fn find_by_id(&self, id: CategoryId) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Upstream, "Failed to find category", e))
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Upstream, "Failed to find category by slug", e)
            })
    }

    async fn create(&self, data: &CreateCategory) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, slug, parent_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.slug)
        .bind(data.parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &data.slug, "create"))
    }

    async fn update(&self, id: CategoryId, data: &UpdateCategory) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $2, slug = $3, parent_id = $4, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.slug)
        .bind(data.parent_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &data.slug, "update"))?
        .ok_or_else(|| AppError::not_found(format!("Category {id} not found")))
    }

    async fn delete(&self, id: CategoryId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                    AppError::conflict(format!(
                        "Category {id} is still referenced by products or subcategories"
                    ))
                }
                _ => AppError::with_source(ErrorKind::Upstream, "Failed to delete category", e),
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_children(&self, id: CategoryId) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE parent_id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Upstream, "Failed to count child categories", e)
            })?;
        Ok(count as u64)
    }
}
