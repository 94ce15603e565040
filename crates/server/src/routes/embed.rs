use crate::error::{ServerError, ServerResult};
use crate::routes::require_json_object;
use crate::state::ServerState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Default chunk size handed to the model layer when the request does not
/// specify one. Purely a throughput hint.
const DEFAULT_BATCH_SIZE: usize = 32;

/// Response for a single embedded text
#[derive(Debug, Serialize)]
pub struct EmbedResponse {
    pub embedding: Vec<f32>,
    pub dimension: usize,
    pub model: String,
}

/// Response for a batch of embedded texts
#[derive(Debug, Serialize)]
pub struct BatchEmbedResponse {
    pub embeddings: Vec<Vec<f32>>,
    pub count: usize,
    pub dimension: usize,
    pub model: String,
}

/// Embed a single text.
///
/// Validation is fail-fast: body must be JSON, then `text` must be present
/// and non-empty. Any model-layer failure surfaces as a 500 with the
/// underlying message.
pub async fn embed(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ServerResult<Json<EmbedResponse>> {
    let data = require_json_object(body)?;

    let text = data
        .get("text")
        .and_then(Value::as_str)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ServerError::BadRequest("Field 'text' is required".into()))?;

    let model = state.registry.get().await?;
    let embedding = model.encode(text).await?;

    Ok(Json(EmbedResponse {
        dimension: embedding.len(),
        embedding,
        model: model.name().to_string(),
    }))
}

/// Embed a batch of texts.
///
/// `texts` must be a non-empty array of strings; `batch_size` defaults to
/// 32 and never affects output order or content. Results are all-or-nothing:
/// an encoding failure fails the whole request.
pub async fn embed_batch(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ServerResult<Json<BatchEmbedResponse>> {
    let data = require_json_object(body)?;

    let items = match data.get("texts") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => {
            return Err(ServerError::BadRequest(
                "Field 'texts' must be a non-empty array".into(),
            ))
        }
    };

    if items.len() > state.config.max_batch_texts {
        return Err(ServerError::BadRequest(format!(
            "Field 'texts' exceeds the maximum of {} entries",
            state.config.max_batch_texts
        )));
    }

    let texts = items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                ServerError::BadRequest("Field 'texts' must contain only strings".into())
            })
        })
        .collect::<ServerResult<Vec<String>>>()?;

    let batch_size = match data.get("batch_size") {
        None | Some(Value::Null) => DEFAULT_BATCH_SIZE,
        Some(value) => value
            .as_u64()
            .filter(|&n| n >= 1)
            .ok_or_else(|| {
                ServerError::BadRequest("Field 'batch_size' must be a positive integer".into())
            })? as usize,
    };

    let model = state.registry.get().await?;
    let embeddings = model.encode_batch(&texts, batch_size).await?;
    let dimension = embeddings.first().map(|v| v.len()).unwrap_or(0);

    Ok(Json(BatchEmbedResponse {
        count: embeddings.len(),
        dimension,
        embeddings,
        model: model.name().to_string(),
    }))
}
