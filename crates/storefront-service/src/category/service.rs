//! Category browsing and administration.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use storefront_cache::{CatalogCache, keys};
use storefront_core::error::AppError;
use storefront_core::types::{CategoryId, is_reserved_slug, is_valid_slug, slugify};
use storefront_database::repositories::{CategoryStore, ProductStore};
use storefront_entity::category::{Category, CategoryTree, CreateCategory, UpdateCategory};

use super::tree::CategoryIndex;

/// A category resolved for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryView {
    /// The resolved category.
    pub category: Category,
    /// Ancestors from the root down to the immediate parent.
    pub ancestor_path: Vec<Category>,
    /// Direct children.
    pub child_categories: Vec<Category>,
}

/// Admin input for creating or replacing a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryInput {
    /// Display name.
    pub name: String,
    /// URL slug. Derived from the name on create when absent; kept on update.
    pub slug: Option<String>,
    /// Parent category, or `None` for a root.
    pub parent_id: Option<CategoryId>,
}

/// Resolves categories and manages their lifecycle.
#[derive(Debug, Clone)]
pub struct CategoryService {
    /// Category store.
    categories: Arc<dyn CategoryStore>,
    /// Product store, consulted before deletes.
    products: Arc<dyn ProductStore>,
    /// Query cache.
    cache: CatalogCache,
}

impl CategoryService {
    /// Creates a new category service.
    pub fn new(
        categories: Arc<dyn CategoryStore>,
        products: Arc<dyn ProductStore>,
        cache: CatalogCache,
    ) -> Self {
        Self {
            categories,
            products,
            cache,
        }
    }

    /// Every category, through the query cache.
    pub async fn list(&self) -> Result<Vec<Category>, AppError> {
        let store = Arc::clone(&self.categories);
        self.cache
            .categories
            .get_or_fetch(keys::categories_all(), async move { store.list_all().await })
            .await
    }

    /// Index over every category.
    pub async fn index(&self) -> Result<CategoryIndex, AppError> {
        Ok(CategoryIndex::new(self.list().await?))
    }

    /// The full category forest.
    pub async fn tree(&self) -> Result<CategoryTree, AppError> {
        Ok(self.index().await?.build_forest())
    }

    /// Resolve a slug to the category, its breadcrumb path, and its children.
    pub async fn resolve_category_by_slug(&self, slug: &str) -> Result<CategoryView, AppError> {
        let index = self.index().await?;
        let category = index
            .by_slug(slug)
            .ok_or_else(|| AppError::not_found(format!("Category '{slug}' not found")))?;

        Ok(CategoryView {
            ancestor_path: index.ancestor_path(category),
            child_categories: index.children_of(category.id).into_iter().cloned().collect(),
            category: category.clone(),
        })
    }

    /// Gets a category by ID.
    pub async fn get(&self, id: CategoryId) -> Result<Category, AppError> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Category {id} not found")))
    }

    /// Creates a new category.
    pub async fn create(&self, input: CategoryInput) -> Result<Category, AppError> {
        let name = validate_name(&input.name)?;
        let slug = resolve_slug(input.slug.as_deref(), &name)?;

        if let Some(parent_id) = input.parent_id {
            self.require_parent(parent_id).await?;
        }

        let category = self
            .categories
            .create(&CreateCategory {
                name,
                slug,
                parent_id: input.parent_id,
            })
            .await?;
        self.cache.invalidate_categories().await;

        info!(
            category_id = %category.id,
            slug = %category.slug,
            parent_id = ?category.parent_id,
            "Category created"
        );
        Ok(category)
    }

    /// Replaces a category's name, slug, and parent.
    ///
    /// Moving a category beneath itself or any of its descendants is rejected.
    pub async fn update(&self, id: CategoryId, input: CategoryInput) -> Result<Category, AppError> {
        let existing = self.get(id).await?;
        let name = validate_name(&input.name)?;
        let slug = match input.slug.as_deref() {
            Some(raw) => resolve_slug(Some(raw), &name)?,
            None => existing.slug.clone(),
        };

        if let Some(parent_id) = input.parent_id {
            if parent_id == id {
                return Err(AppError::validation("A category cannot be its own parent"));
            }
            self.require_parent(parent_id).await?;

            let index = CategoryIndex::new(self.categories.list_all().await?);
            if index.is_in_subtree(id, parent_id) {
                return Err(AppError::validation(format!(
                    "Cannot move category {id} beneath its own descendant {parent_id}"
                )));
            }
        }

        let category = self
            .categories
            .update(
                id,
                &UpdateCategory {
                    name,
                    slug,
                    parent_id: input.parent_id,
                },
            )
            .await?;
        self.cache.invalidate_categories().await;

        info!(
            category_id = %id,
            slug = %category.slug,
            parent_id = ?category.parent_id,
            "Category updated"
        );
        Ok(category)
    }

    /// Deletes a category.
    ///
    /// Blocked with a conflict while any product references the category or
    /// any child category exists.
    pub async fn delete(&self, id: CategoryId) -> Result<(), AppError> {
        let category = self.get(id).await?;

        let product_count = self.products.count_in_category(id).await?;
        if product_count > 0 {
            warn!(category_id = %id, product_count, "Category delete blocked by products");
            return Err(AppError::conflict(format!(
                "Category '{}' still has {product_count} product(s)",
                category.slug
            )));
        }

        let child_count = self.categories.count_children(id).await?;
        if child_count > 0 {
            warn!(category_id = %id, child_count, "Category delete blocked by children");
            return Err(AppError::conflict(format!(
                "Category '{}' still has {child_count} subcategory(ies)",
                category.slug
            )));
        }

        if !self.categories.delete(id).await? {
            return Err(AppError::not_found(format!("Category {id} not found")));
        }
        self.cache.invalidate_categories().await;

        info!(category_id = %id, slug = %category.slug, "Category deleted");
        Ok(())
    }

    async fn require_parent(&self, parent_id: CategoryId) -> Result<(), AppError> {
        match self.categories.find_by_id(parent_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::validation(format!(
                "Parent category {parent_id} does not exist"
            ))),
        }
    }
}

/// Trim and require a non-empty display name.
pub(crate) fn validate_name(raw: &str) -> Result<String, AppError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::validation("Name cannot be empty"));
    }
    if name.chars().count() > 200 {
        return Err(AppError::validation("Name cannot exceed 200 characters"));
    }
    Ok(name.to_string())
}

/// Use the given slug, or derive one from `name`, and validate the result.
pub(crate) fn resolve_slug(raw: Option<&str>, name: &str) -> Result<String, AppError> {
    let slug = match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(given) => given.to_string(),
        None => slugify(name),
    };
    if !is_valid_slug(&slug) {
        return Err(AppError::validation(format!(
            "Invalid slug '{slug}': use lowercase letters, digits, and single dashes"
        )));
    }
    if is_reserved_slug(&slug) {
        return Err(AppError::validation(format!(
            "Slug '{slug}' is reserved; choose another"
        )));
    }
    Ok(slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::error::ErrorKind;
    use storefront_database::repositories::memory::{
        MemoryCategoryStore, MemoryProductStore, category_row, product_row,
    };

    fn service_with(categories: Vec<Category>) -> CategoryService {
        CategoryService::new(
            Arc::new(MemoryCategoryStore::with_rows(categories)),
            Arc::new(MemoryProductStore::with_rows(vec![product_row(10, "tee", 2, 2000)])),
            CatalogCache::new(&Default::default()),
        )
    }

    fn men_catalog() -> Vec<Category> {
        vec![
            category_row(1, "Men", "men", None),
            category_row(2, "Shirts", "men-shirts", Some(1)),
            category_row(3, "Oxford", "men-shirts-oxford", Some(2)),
        ]
    }

    #[tokio::test]
    async fn test_resolve_by_slug() {
        let service = service_with(men_catalog());
        let view = service.resolve_category_by_slug("men-shirts").await.unwrap();
        assert_eq!(view.category.id, CategoryId::new(2));
        assert_eq!(view.ancestor_path.len(), 1);
        assert_eq!(view.ancestor_path[0].slug, "men");
        assert_eq!(view.child_categories.len(), 1);
        assert_eq!(view.child_categories[0].slug, "men-shirts-oxford");
    }

    #[tokio::test]
    async fn test_resolve_unknown_slug_is_not_found() {
        let service = service_with(men_catalog());
        let err = service.resolve_category_by_slug("kids").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_create_derives_slug_and_invalidates_list() {
        let service = service_with(men_catalog());
        assert_eq!(service.list().await.unwrap().len(), 3);

        let created = service
            .create(CategoryInput {
                name: "Women's Shoes".into(),
                slug: None,
                parent_id: None,
            })
            .await
            .unwrap();
        assert_eq!(created.slug, "women-s-shoes");
        assert_eq!(service.list().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_create_rejects_missing_parent() {
        let service = service_with(men_catalog());
        let err = service
            .create(CategoryInput {
                name: "Lost".into(),
                slug: None,
                parent_id: Some(CategoryId::new(42)),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_update_rejects_move_beneath_descendant() {
        let service = service_with(men_catalog());
        let err = service
            .update(
                CategoryId::new(1),
                CategoryInput {
                    name: "Men".into(),
                    slug: None,
                    parent_id: Some(CategoryId::new(3)),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let moved = service
            .update(
                CategoryId::new(3),
                CategoryInput {
                    name: "Oxford".into(),
                    slug: None,
                    parent_id: Some(CategoryId::new(1)),
                },
            )
            .await
            .unwrap();
        assert_eq!(moved.parent_id, Some(CategoryId::new(1)));
        assert_eq!(moved.slug, "men-shirts-oxford");
    }

    #[tokio::test]
    async fn test_delete_blocked_by_products_then_children() {
        let service = service_with(men_catalog());

        let by_products = service.delete(CategoryId::new(2)).await.unwrap_err();
        assert_eq!(by_products.kind, ErrorKind::Conflict);
        assert!(by_products.message.contains("product"));

        let by_children = service.delete(CategoryId::new(1)).await.unwrap_err();
        assert_eq!(by_children.kind, ErrorKind::Conflict);
        assert!(by_children.message.contains("subcategor"));

        service.delete(CategoryId::new(3)).await.unwrap();
        assert_eq!(service.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let store = Arc::new(MemoryCategoryStore::with_rows(men_catalog()));
        store.set_unavailable(true);
        let service = CategoryService::new(
            store,
            Arc::new(MemoryProductStore::new()),
            CatalogCache::disabled(),
        );
        let err = service.tree().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Upstream);
    }

    #[test]
    fn test_slug_resolution() {
        assert_eq!(resolve_slug(None, "Summer Sale").unwrap(), "summer-sale");
        assert_eq!(resolve_slug(Some("  "), "Hats").unwrap(), "hats");
        assert!(resolve_slug(Some("Bad Slug"), "x").is_err());
        assert_eq!(
            resolve_slug(None, "Tree").unwrap_err().kind,
            ErrorKind::Validation
        );
        assert!(resolve_slug(Some("featured"), "Deals").is_err());
        assert!(validate_name("   ").is_err());
    }
}
