// handlers/public/health.rs - GET /health

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::middleware::ApiResponse;
use crate::state::AppState;

/// Liveness plus a database round trip; 503 when the store does not answer
pub async fn health(State(state): State<AppState>) -> Response {
    let now = chrono::Utc::now();

    match state.repos.health.ping().await {
        Ok(()) => ApiResponse::success(json!({
            "status": "ok",
            "timestamp": now,
            "database": "ok"
        }))
        .into_response(),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            ApiResponse::with_status(
                json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                }),
                StatusCode::SERVICE_UNAVAILABLE,
            )
            .into_response()
        }
    }
}
