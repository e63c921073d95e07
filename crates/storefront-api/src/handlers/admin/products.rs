//! Product administration handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use validator::Validate;

use storefront_core::types::ProductId;

use crate::dto::request::ProductRequest;
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/admin/products
pub async fn create_product(
    State(state): State<AppState>,
    Json(req): Json<ProductRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    req.validate()?;

    let product = state.product_service.create(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true, "data": product })),
    ))
}

/// PUT /api/admin/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ProductRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()?;

    let product = state
        .product_service
        .update(ProductId::new(id), req.into())
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": product })))
}

/// DELETE /api/admin/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.product_service.delete(ProductId::new(id)).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": MessageResponse::new("Product deleted")
    })))
}
