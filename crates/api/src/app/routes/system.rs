use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::errors::PageError;
use crate::app::services::AppServices;

/// Liveness probe; also reports whether the supplier store answers.
pub async fn health(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    match services.suppliers().repository().count().await {
        Ok(suppliers) => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "ok", "suppliers": suppliers })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: supplier store unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "status": "degraded", "error": "storage_unavailable" })),
            )
        }
    }
}

/// Fallback for unmatched routes.
pub async fn not_found() -> PageError {
    PageError::NotFound
}
