//! Route definitions for the storefront HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! Admin routes sit behind the bearer-token guard.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Multipart framing allowance on top of the image size limit.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.storage.max_image_size_bytes as usize + MULTIPART_OVERHEAD_BYTES;
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(category_routes())
        .merge(product_routes())
        .nest("/admin", admin_routes(state.clone()));

    let mut router = Router::new().nest("/api", api_routes);

    // Local images are served by this process; S3 URLs point elsewhere.
    let storage = &state.config.storage;
    let images_path = storage.local.public_base_url.trim_end_matches('/');
    if storage.provider == "local" && images_path.len() > 1 && images_path.starts_with('/') {
        router = router.nest_service(images_path, ServeDir::new(&storage.local.root_path));
    }

    router
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TimeoutLayer::new(timeout))
        .layer(build_compression_layer())
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&state.config.server.cors))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Health check (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Category browsing
fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(handlers::category::list_categories))
        .route("/categories/tree", get(handlers::category::category_tree))
        .route("/categories/{slug}", get(handlers::category::get_category))
        .route(
            "/categories/{slug}/products",
            get(handlers::category::category_products),
        )
}

/// Product search, featured strip, and detail
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(handlers::product::search_products))
        .route(
            "/products/featured",
            get(handlers::product::featured_products),
        )
        .route("/products/{slug}", get(handlers::product::get_product))
}

/// Admin-only endpoints
fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Categories
        .route(
            "/categories",
            post(handlers::admin::categories::create_category),
        )
        .route(
            "/categories/{id}",
            put(handlers::admin::categories::update_category)
                .delete(handlers::admin::categories::delete_category),
        )
        // Products
        .route("/products", post(handlers::admin::products::create_product))
        .route(
            "/products/{id}",
            put(handlers::admin::products::update_product)
                .delete(handlers::admin::products::delete_product),
        )
        // Images
        .route(
            "/products/{id}/images",
            post(handlers::admin::images::upload_image),
        )
        .route(
            "/products/{id}/images/{image_id}",
            delete(handlers::admin::images::delete_image),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::admin::require_admin_token,
        ))
}
