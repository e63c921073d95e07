//! Product listings scoped to a category subtree.

use std::sync::Arc;

use tracing::debug;

use storefront_cache::{CatalogCache, keys};
use storefront_core::error::AppError;
use storefront_core::types::{CategoryId, PageRequest, PageResponse, PriceRange};
use storefront_database::repositories::ProductStore;
use storefront_entity::product::{ProductQuery, ProductWithImages};

use crate::category::CategoryService;

/// Lists products for a category and everything beneath it.
#[derive(Debug, Clone)]
pub struct ProductQueryService {
    /// Category resolution.
    categories: Arc<CategoryService>,
    /// Product store.
    products: Arc<dyn ProductStore>,
    /// Query cache.
    cache: CatalogCache,
}

impl ProductQueryService {
    /// Creates a new product query service.
    pub fn new(
        categories: Arc<CategoryService>,
        products: Arc<dyn ProductStore>,
        cache: CatalogCache,
    ) -> Self {
        Self {
            categories,
            products,
            cache,
        }
    }

    /// Products in the category named by `slug` or any of its descendants,
    /// newest first, within `price`.
    pub async fn list_products_for_category(
        &self,
        slug: &str,
        price: PriceRange,
        page: PageRequest,
    ) -> Result<PageResponse<ProductWithImages>, AppError> {
        let index = self.categories.index().await?;
        let category = index
            .by_slug(slug)
            .ok_or_else(|| AppError::not_found(format!("Category '{slug}' not found")))?;

        let ids = index.descendant_ids(category.id);
        debug!(slug, category_count = ids.len(), "Expanded category subtree");

        self.list_products(ids, price, page).await
    }

    /// Products whose category is in `ids`, newest first, within `price`.
    ///
    /// An empty id set yields an empty page.
    pub async fn list_products(
        &self,
        ids: Vec<CategoryId>,
        price: PriceRange,
        page: PageRequest,
    ) -> Result<PageResponse<ProductWithImages>, AppError> {
        if ids.is_empty() {
            return Ok(PageResponse::empty(&page));
        }

        let query = ProductQuery::for_categories(ids, price).paged(page.limit(), page.offset());
        self.fetch_page(query, page).await
    }

    /// Run a listing query and its count concurrently, through the cache.
    pub(crate) async fn fetch_page(
        &self,
        query: ProductQuery,
        page: PageRequest,
    ) -> Result<PageResponse<ProductWithImages>, AppError> {
        let store = Arc::clone(&self.products);
        let key = keys::product_listing(&query);

        self.cache
            .products
            .get_or_fetch(key, async move {
                let (items, total) = tokio::try_join!(store.list(&query), store.count(&query))?;
                Ok::<_, AppError>(PageResponse::new(items, page.page, page.page_size, total))
            })
            .await
    }
}
