//! Bearer-token guard for the admin routes.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use storefront_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Rejects admin requests whose `Authorization` header does not carry the
/// configured token. Passes everything through when no token is configured.
pub async fn require_admin_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.config.admin.api_token.as_deref() else {
        return Ok(next.run(request).await);
    };

    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);

    match presented {
        Some(token) if token == expected => Ok(next.run(request).await),
        Some(_) => {
            warn!(path = %request.uri().path(), "Rejected admin request with wrong token");
            Err(AppError::unauthorized("Invalid admin token").into())
        }
        None => Err(AppError::unauthorized("Missing admin bearer token").into()),
    }
}
