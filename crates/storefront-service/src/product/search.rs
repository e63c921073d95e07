//! Catalog-wide product search and the featured strip.

use std::sync::Arc;

use storefront_cache::{CatalogCache, keys};
use storefront_core::error::AppError;
use storefront_core::types::{PageRequest, PageResponse, PriceRange};
use storefront_database::repositories::ProductStore;
use storefront_entity::product::{ProductQuery, ProductWithImages};

use super::query::ProductQueryService;

/// Searches products across every category.
#[derive(Debug, Clone)]
pub struct SearchService {
    /// Shared listing pipeline.
    listings: Arc<ProductQueryService>,
    /// Product store.
    products: Arc<dyn ProductStore>,
    /// Query cache.
    cache: CatalogCache,
    /// Size of the featured strip.
    featured_limit: u64,
}

impl SearchService {
    /// Creates a new search service.
    pub fn new(
        listings: Arc<ProductQueryService>,
        products: Arc<dyn ProductStore>,
        cache: CatalogCache,
        featured_limit: u64,
    ) -> Self {
        Self {
            listings,
            products,
            cache,
            featured_limit,
        }
    }

    /// Products whose name or description contains `term`, case-insensitively.
    ///
    /// A blank term lists every product.
    pub async fn search(
        &self,
        term: Option<&str>,
        price: PriceRange,
        page: PageRequest,
    ) -> Result<PageResponse<ProductWithImages>, AppError> {
        let query = ProductQuery {
            search: term
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            price,
            ..ProductQuery::default()
        }
        .paged(page.limit(), page.offset());

        self.listings.fetch_page(query, page).await
    }

    /// The newest featured products.
    pub async fn featured(&self) -> Result<Vec<ProductWithImages>, AppError> {
        let limit = self.featured_limit;
        let store = Arc::clone(&self.products);
        let query = ProductQuery {
            featured_only: true,
            ..ProductQuery::default()
        }
        .paged(limit, 0);

        let page = self
            .cache
            .products
            .get_or_fetch(keys::featured_products(limit), async move {
                let items = store.list(&query).await?;
                let total = items.len() as u64;
                Ok::<_, AppError>(PageResponse::new(items, 1, limit, total))
            })
            .await?;
        Ok(page.items)
    }
}
