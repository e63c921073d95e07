//! Public product handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use storefront_core::types::PageResponse;
use storefront_entity::product::ProductWithImages;
use storefront_service::ProductDetail;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::ListingParams;
use crate::state::AppState;

/// GET /api/products?q=
pub async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<Json<ApiResponse<PageResponse<ProductWithImages>>>, ApiError> {
    let price = params.price_range()?;
    let page = params.page_request(&state.config.catalog)?;

    let results = state
        .search_service
        .search(params.search_term(), price, page)
        .await?;
    Ok(Json(ApiResponse::ok(results)))
}

/// GET /api/products/featured
pub async fn featured_products(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ProductWithImages>>>, ApiError> {
    let products = state.search_service.featured().await?;
    Ok(Json(ApiResponse::ok(products)))
}

/// GET /api/products/{slug}
pub async fn get_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<ProductDetail>>, ApiError> {
    let detail = state.product_service.get_by_slug(&slug).await?;
    Ok(Json(ApiResponse::ok(detail)))
}
