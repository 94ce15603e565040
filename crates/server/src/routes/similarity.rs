use crate::error::{ServerError, ServerResult};
use crate::routes::require_json_object;
use crate::state::ServerState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use embedder::cosine_similarity;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Response for a pairwise similarity computation
#[derive(Debug, Serialize)]
pub struct SimilarityResponse {
    pub similarity: f32,
    pub text1: String,
    pub text2: String,
    pub model: String,
}

/// Cosine similarity between two texts.
///
/// Both texts are encoded in a single batch call so the model pays its
/// fixed per-invocation overhead once. If either text embeds to a zero
/// vector the similarity is 0.0 (see [`cosine_similarity`]).
pub async fn similarity(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ServerResult<Json<SimilarityResponse>> {
    let data = require_json_object(body)?;

    let text1 = data.get("text1").and_then(Value::as_str).unwrap_or("");
    let text2 = data.get("text2").and_then(Value::as_str).unwrap_or("");
    if text1.trim().is_empty() || text2.trim().is_empty() {
        return Err(ServerError::BadRequest(
            "Fields 'text1' and 'text2' are required".into(),
        ));
    }

    let model = state.registry.get().await?;
    let pair = [text1.to_string(), text2.to_string()];
    let vectors = model.encode_batch(&pair, pair.len()).await?;

    let score = match (vectors.first(), vectors.get(1)) {
        (Some(v1), Some(v2)) => cosine_similarity(v1, v2),
        _ => {
            return Err(ServerError::Internal(
                "model returned fewer than two vectors".into(),
            ))
        }
    };

    Ok(Json(SimilarityResponse {
        similarity: score,
        text1: text1.to_string(),
        text2: text2.to_string(),
        model: model.name().to_string(),
    }))
}
