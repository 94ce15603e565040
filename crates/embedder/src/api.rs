use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::encoder::TextEncoder;
use crate::EmbedderError;

/// Remote encoder speaking the Hugging Face feature-extraction protocol:
/// `{"inputs": [texts...]}` in, a nested float array out. Response parsing is
/// tolerant of the common provider shapes (`embeddings` key, OpenAI-style
/// `data[].embedding`, bare arrays) so one config knob covers most hosts.
pub(crate) struct ApiEncoder {
    client: reqwest::Client,
    url: String,
    auth_header: Option<String>,
}

impl ApiEncoder {
    pub(crate) fn new(
        url: &str,
        auth_header: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, EmbedderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(32)
            .build()
            .map_err(|e| EmbedderError::InvalidConfig(format!("http client: {e}")))?;

        Ok(Self {
            client,
            url: url.to_string(),
            auth_header,
        })
    }

    async fn send(&self, payload: Value) -> Result<Value, EmbedderError> {
        let mut request = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json");
        if let Some(header) = self.auth_header.as_deref() {
            request = request.header("Authorization", header);
        }

        let response = request
            .json(&payload)
            .send()
            .await
            .map_err(|e| EmbedderError::Request(format!("HTTP request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbedderError::Request(format!("HTTP error {status}: {body}")));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| EmbedderError::Inference(format!("invalid JSON response: {e}")))
    }
}

#[async_trait]
impl TextEncoder for ApiEncoder {
    async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let response = self.send(json!({ "inputs": texts })).await?;
        let vectors = parse_embeddings_from_value(response)?;

        if vectors.len() != texts.len() {
            return Err(EmbedderError::Inference(format!(
                "API returned {} embeddings for {} inputs",
                vectors.len(),
                texts.len()
            )));
        }

        Ok(vectors)
    }
}

fn parse_embeddings_from_value(value: Value) -> Result<Vec<Vec<f32>>, EmbedderError> {
    match value {
        Value::Object(mut map) => {
            if let Some(embeddings) = map.remove("embeddings") {
                return parse_embedding_collection(embeddings);
            }

            if let Some(Value::Array(items)) = map.remove("data") {
                let mut vectors = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::Object(mut obj) => {
                            if let Some(embedding) = obj.remove("embedding") {
                                vectors.push(parse_embedding_vector(embedding)?);
                            } else {
                                return Err(EmbedderError::Inference(
                                    "missing `embedding` field in data item".into(),
                                ));
                            }
                        }
                        _ => {
                            return Err(EmbedderError::Inference(
                                "unexpected entry inside `data` array".into(),
                            ))
                        }
                    }
                }
                return Ok(vectors);
            }

            Err(EmbedderError::Inference(
                "unsupported API response shape".into(),
            ))
        }
        other => parse_embedding_collection(other),
    }
}

fn parse_embedding_collection(value: Value) -> Result<Vec<Vec<f32>>, EmbedderError> {
    match value {
        Value::Array(items) => {
            if items.is_empty() {
                Ok(Vec::new())
            } else if items.iter().all(|item| matches!(item, Value::Array(_))) {
                items.into_iter().map(parse_embedding_vector).collect()
            } else {
                parse_embedding_vector(Value::Array(items)).map(|vec| vec![vec])
            }
        }
        other => parse_embedding_vector(other).map(|vec| vec![vec]),
    }
}

fn parse_embedding_vector(value: Value) -> Result<Vec<f32>, EmbedderError> {
    match value {
        Value::Array(values) => values
            .into_iter()
            .map(|entry| match entry {
                Value::Number(num) => num
                    .as_f64()
                    .map(|f| f as f32)
                    .ok_or_else(|| EmbedderError::Inference("non-finite embedding value".into())),
                other => Err(EmbedderError::Inference(format!(
                    "embedding entries must be numbers, got {other:?}"
                ))),
            })
            .collect(),
        other => Err(EmbedderError::Inference(format!(
            "embedding vector must be an array, got {other:?}"
        ))),
    }
}
