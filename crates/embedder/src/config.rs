use serde::{Deserialize, Serialize};

/// Runtime configuration describing which encoder backend to use and how to
/// post-process vectors.
///
/// # Example
/// ```
/// use embedder::EmbedderConfig;
///
/// let cfg = EmbedderConfig {
///     mode: "api".into(),
///     api_url: Some("https://router.huggingface.co/hf-inference/models/sentence-transformers/all-MiniLM-L6-v2/pipeline/feature-extraction".into()),
///     api_auth_header: Some("Bearer hf_xxx".into()),
///     ..Default::default()
/// };
/// assert_eq!(cfg.model_name, "all-MiniLM-L6-v2");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EmbedderConfig {
    /// Backend selector: `"api"` (remote HTTP inference) or `"stub"`
    /// (deterministic local vectors). Unknown values behave like `"api"`.
    pub mode: String,
    /// Friendly model label surfaced on every response.
    pub model_name: String,
    /// Inference endpoint when [`mode`](Self::mode) is `"api"`. When absent
    /// the stub backend is used instead.
    pub api_url: Option<String>,
    /// Authorization header value (e.g., `"Bearer hf_xxx"`).
    pub api_auth_header: Option<String>,
    /// Overall API timeout in seconds.
    pub api_timeout_secs: u64,
    /// Vector dimension produced by the stub backend. 384 matches the
    /// MiniLM-class default model.
    pub stub_dimension: usize,
    /// L2-normalize produced vectors. Off by default; the similarity
    /// endpoint divides by magnitudes itself.
    pub normalize: bool,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            mode: "api".into(),
            model_name: "all-MiniLM-L6-v2".into(),
            api_url: None,
            api_auth_header: None,
            api_timeout_secs: 30,
            stub_dimension: 384,
            normalize: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let cfg = EmbedderConfig::default();
        assert_eq!(cfg.mode, "api");
        assert_eq!(cfg.model_name, "all-MiniLM-L6-v2");
        assert!(cfg.api_url.is_none());
        assert!(cfg.api_auth_header.is_none());
        assert_eq!(cfg.api_timeout_secs, 30);
        assert_eq!(cfg.stub_dimension, 384);
        assert!(!cfg.normalize);
    }

    #[test]
    fn config_serde_roundtrip() {
        let cfg = EmbedderConfig {
            mode: "stub".into(),
            model_name: "test-model".into(),
            api_url: Some("https://api.example.com/embed".into()),
            api_auth_header: Some("Bearer token123".into()),
            api_timeout_secs: 60,
            stub_dimension: 8,
            normalize: true,
        };

        let serialized = serde_json::to_string(&cfg).unwrap();
        let deserialized: EmbedderConfig = serde_json::from_str(&serialized).unwrap();

        assert_eq!(cfg, deserialized);
    }

    #[test]
    fn config_partial_deserialization_fills_defaults() {
        let cfg: EmbedderConfig = serde_json::from_str(r#"{"mode":"stub"}"#).unwrap();
        assert_eq!(cfg.mode, "stub");
        assert_eq!(cfg.stub_dimension, 384);
        assert_eq!(cfg.model_name, "all-MiniLM-L6-v2");
    }
}
