//! Public category browsing handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use storefront_core::types::PageResponse;
use storefront_entity::category::{Category, CategoryTree};
use storefront_entity::product::ProductWithImages;
use storefront_service::CategoryView;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::ListingParams;
use crate::state::AppState;

/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Category>>>, ApiError> {
    let categories = state.category_service.list().await?;
    Ok(Json(ApiResponse::ok(categories)))
}

/// GET /api/categories/tree
pub async fn category_tree(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CategoryTree>>, ApiError> {
    let tree = state.category_service.tree().await?;
    Ok(Json(ApiResponse::ok(tree)))
}

/// GET /api/categories/{slug}
pub async fn get_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<CategoryView>>, ApiError> {
    let view = state.category_service.resolve_category_by_slug(&slug).await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// GET /api/categories/{slug}/products
///
/// Products in the category and every category beneath it, newest first.
pub async fn category_products(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<ListingParams>,
) -> Result<Json<ApiResponse<PageResponse<ProductWithImages>>>, ApiError> {
    let price = params.price_range()?;
    let page = params.page_request(&state.config.catalog)?;

    let products = state
        .product_query_service
        .list_products_for_category(&slug, price, page)
        .await?;
    Ok(Json(ApiResponse::ok(products)))
}
