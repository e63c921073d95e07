//! Category administration handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use validator::Validate;

use storefront_core::types::CategoryId;

use crate::dto::request::CategoryRequest;
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/admin/categories
pub async fn create_category(
    State(state): State<AppState>,
    Json(req): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    req.validate()?;

    let category = state.category_service.create(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true, "data": category })),
    ))
}

/// PUT /api/admin/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<CategoryRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()?;

    let category = state
        .category_service
        .update(CategoryId::new(id), req.into())
        .await?;

    Ok(Json(
        serde_json::json!({ "success": true, "data": category }),
    ))
}

/// DELETE /api/admin/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.category_service.delete(CategoryId::new(id)).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": MessageResponse::new("Category deleted")
    })))
}
