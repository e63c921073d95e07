//! Health check handler.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use storefront_core::traits::storage::ImageStore;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let database_ok = match &state.database {
        Some(pool) => match pool.health_check().await {
            Ok(ok) => Some(ok),
            Err(e) => {
                warn!(error = %e, "Database health check failed");
                Some(false)
            }
        },
        None => None,
    };

    let provider = state.image_store.provider_type().to_string();
    let storage_ok = match state.image_store.health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            warn!(provider = %provider, error = %e, "Storage health check failed");
            false
        }
    };

    let database = match database_ok {
        Some(true) => "connected",
        Some(false) => "unavailable",
        None => "in-memory",
    };
    let healthy = database_ok != Some(false) && storage_ok;

    Json(ApiResponse::ok(HealthResponse {
        status: if healthy { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        database: database.to_string(),
        cache: if state.cache.is_enabled() {
            "enabled"
        } else {
            "disabled"
        }
        .to_string(),
        storage: format!(
            "{provider}: {}",
            if storage_ok { "available" } else { "unavailable" }
        ),
    }))
}
