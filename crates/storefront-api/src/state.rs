//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use storefront_cache::CatalogCache;
use storefront_core::config::AppConfig;
use storefront_core::traits::storage::ImageStore;
use storefront_database::DatabasePool;
use storefront_database::repositories::{CategoryStore, ProductStore};
use storefront_service::{
    CategoryService, ImageService, ProductQueryService, ProductService, SearchService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped or cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL pool, absent when running on in-memory stores
    pub database: Option<DatabasePool>,
    /// Catalog query cache
    pub cache: CatalogCache,
    /// Product image object storage
    pub image_store: Arc<dyn ImageStore>,

    // ── Services ─────────────────────────────────────────────
    /// Category browsing and admin
    pub category_service: Arc<CategoryService>,
    /// Category-scoped product listings
    pub product_query_service: Arc<ProductQueryService>,
    /// Catalog search and featured products
    pub search_service: Arc<SearchService>,
    /// Product detail and admin
    pub product_service: Arc<ProductService>,
    /// Product image upload and removal
    pub image_service: Arc<ImageService>,

    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Wire every service over the given stores.
    pub fn new(
        config: AppConfig,
        database: Option<DatabasePool>,
        categories: Arc<dyn CategoryStore>,
        products: Arc<dyn ProductStore>,
        image_store: Arc<dyn ImageStore>,
    ) -> Self {
        let cache = CatalogCache::new(&config.cache);

        let category_service = Arc::new(CategoryService::new(
            Arc::clone(&categories),
            Arc::clone(&products),
            cache.clone(),
        ));
        let product_query_service = Arc::new(ProductQueryService::new(
            Arc::clone(&category_service),
            Arc::clone(&products),
            cache.clone(),
        ));
        let search_service = Arc::new(SearchService::new(
            Arc::clone(&product_query_service),
            Arc::clone(&products),
            cache.clone(),
            config.catalog.featured_limit,
        ));
        let product_service = Arc::new(ProductService::new(
            Arc::clone(&products),
            categories,
            Arc::clone(&category_service),
            Arc::clone(&image_store),
            cache.clone(),
        ));
        let image_service = Arc::new(ImageService::new(
            products,
            Arc::clone(&image_store),
            config.storage.clone(),
            cache.clone(),
        ));

        Self {
            config: Arc::new(config),
            database,
            cache,
            image_store,
            category_service,
            product_query_service,
            search_service,
            product_service,
            image_service,
            started_at: Instant::now(),
        }
    }
}
