//! Product image upload and removal handlers.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use bytes::Bytes;

use storefront_core::error::AppError;
use storefront_core::types::{ProductId, ProductImageId};
use storefront_service::ImageUpload;

use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/admin/products/{id}/images
///
/// Multipart body with the image in the `file` field.
pub async fn upload_image(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let mut file_name: Option<String> = None;
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        if name == "file" {
            file_name = field.file_name().map(String::from);
            data = Some(field.bytes().await?);
        }
    }

    let data = data.ok_or_else(|| AppError::validation("Missing multipart field 'file'"))?;
    let image = state
        .image_service
        .upload(ProductId::new(id), ImageUpload { file_name, data })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true, "data": image })),
    ))
}

/// DELETE /api/admin/products/{id}/images/{image_id}
pub async fn delete_image(
    State(state): State<AppState>,
    Path((id, image_id)): Path<(i64, i64)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .image_service
        .delete(ProductId::new(id), ProductImageId::new(image_id))
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": MessageResponse::new("Image deleted")
    })))
}
