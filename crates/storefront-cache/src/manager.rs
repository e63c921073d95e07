//! Catalog cache bundle handed to the service layer.

use storefront_core::config::cache::CacheConfig;
use storefront_core::types::PageResponse;
use storefront_entity::category::Category;
use storefront_entity::product::ProductWithImages;
use tracing::info;

use crate::keys;
use crate::query::QueryCache;

/// The query caches used by catalog reads.
#[derive(Debug, Clone)]
pub struct CatalogCache {
    /// Flat category list, keyed by [`keys::categories_all`].
    pub categories: QueryCache<Vec<Category>>,
    /// Product listings and the featured strip.
    pub products: QueryCache<PageResponse<ProductWithImages>>,
}

impl CatalogCache {
    /// Build the caches from configuration.
    pub fn new(config: &CacheConfig) -> Self {
        if config.enabled {
            info!(
                ttl_seconds = config.default_ttl_seconds,
                max_capacity = config.max_capacity,
                "Initializing in-memory query cache"
            );
        } else {
            info!("Query cache disabled");
        }

        Self {
            categories: QueryCache::new("categories", config),
            products: QueryCache::new("products", config),
        }
    }

    /// Caches that never retain anything.
    pub fn disabled() -> Self {
        Self {
            categories: QueryCache::disabled("categories"),
            products: QueryCache::disabled("products"),
        }
    }

    /// Whether caching is active.
    pub fn is_enabled(&self) -> bool {
        self.categories.is_enabled()
    }

    /// Drop the category list and every product listing.
    pub async fn invalidate_categories(&self) {
        self.categories.invalidate(&keys::categories_all()).await;
        self.products.invalidate_prefix(&keys::products_prefix()).await;
    }

    /// Drop every product listing.
    pub async fn invalidate_products(&self) {
        self.products.invalidate_prefix(&keys::products_prefix()).await;
    }
}
