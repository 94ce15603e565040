use crate::state::ServerState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::sync::Arc;

/// Health check endpoint
///
/// Triggers the model load if it has not happened yet, so the first probe
/// after a cold start may be slow. Reports the active model name and its
/// embedding dimension on success; a load failure is reported as unhealthy
/// rather than propagated.
pub async fn health_check(State(state): State<Arc<ServerState>>) -> Response {
    match state.registry.get().await {
        Ok(model) => Json(json!({
            "status": "healthy",
            "model": model.name(),
            "dimension": model.dimension(),
        }))
        .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "unhealthy",
                    "error": err.to_string(),
                })),
            )
                .into_response()
        }
    }
}
