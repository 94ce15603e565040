use async_trait::async_trait;

use crate::api::ApiEncoder;
use crate::stub::StubEncoder;
use crate::{EmbedderConfig, EmbedderError};

/// Backend seam of the embedding core.
///
/// Implementations must be pure with respect to caller-visible state:
/// encoding may cache internally but must not change what other callers
/// observe. One vector is returned per input text, in input order.
#[async_trait]
pub trait TextEncoder: Send + Sync {
    async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedderError>;
}

/// Select and construct the encoder backend for `cfg`.
///
/// `"stub"` always yields the deterministic local encoder. `"api"` (and any
/// unrecognized mode) yields the remote encoder when an endpoint is
/// configured, and otherwise falls back to the stub with a warning so a
/// bare default config still starts.
pub(crate) fn build_encoder(cfg: &EmbedderConfig) -> Result<Box<dyn TextEncoder>, EmbedderError> {
    match cfg.mode.as_str() {
        "stub" => Ok(Box::new(StubEncoder::new(cfg.stub_dimension))),
        _ => match cfg.api_url.as_deref() {
            Some(url) => Ok(Box::new(ApiEncoder::new(
                url,
                cfg.api_auth_header.clone(),
                cfg.api_timeout_secs,
            )?)),
            None => {
                tracing::warn!(
                    model = %cfg.model_name,
                    "no api_url configured, using deterministic stub encoder"
                );
                Ok(Box::new(StubEncoder::new(cfg.stub_dimension)))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stub_mode_builds_stub_encoder() {
        let cfg = EmbedderConfig {
            mode: "stub".into(),
            stub_dimension: 16,
            ..Default::default()
        };
        let encoder = build_encoder(&cfg).unwrap();
        let vectors = encoder.encode(&["hello".into()]).await.unwrap();
        assert_eq!(vectors.len(), 1);
        assert_eq!(vectors[0].len(), 16);
    }

    #[tokio::test]
    async fn api_mode_without_url_falls_back_to_stub() {
        let cfg = EmbedderConfig {
            mode: "api".into(),
            api_url: None,
            ..Default::default()
        };
        let encoder = build_encoder(&cfg).unwrap();
        let vectors = encoder.encode(&["fallback".into()]).await.unwrap();
        assert_eq!(vectors[0].len(), cfg.stub_dimension);
    }
}
