//! API route handlers
//!
//! - `health`: Model health check
//! - `embed`: Single and batch text embedding
//! - `similarity`: Pairwise cosine similarity

pub mod embed;
pub mod health;
pub mod similarity;

use crate::error::{ServerError, ServerResult};
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};

/// API version and base info
///
/// Root endpoint (GET /). Returns server information including version and
/// available endpoints.
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "Embedder Server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/embed",
            "/embed/batch",
            "/similarity",
            "/health"
        ]
    })))
}

/// 404 Not Found handler
///
/// Returns a standardized error response for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}

/// Unwrap a JSON request body, converting extractor rejections (wrong
/// content type, malformed JSON, non-object payloads) into the fixed
/// bad-request message. Field-level validation happens in the handlers so
/// the first failing check wins.
pub(crate) fn require_json_object(
    body: Result<Json<Value>, JsonRejection>,
) -> ServerResult<Value> {
    match body {
        Ok(Json(value)) if value.is_object() => Ok(value),
        _ => Err(ServerError::BadRequest("Request body must be JSON".into())),
    }
}
