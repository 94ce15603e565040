use thiserror::Error;

/// Errors surfaced by the embedding core.
#[derive(Debug, Error)]
pub enum EmbedderError {
    /// Configuration is inconsistent (e.g., api mode with a malformed URL).
    #[error("invalid embedder config: {0}")]
    InvalidConfig(String),
    /// The model could not be initialized. No handle is cached when this is
    /// returned, so a later call retries the load.
    #[error("model load failed: {0}")]
    ModelLoad(String),
    /// HTTP transport failure while talking to a remote inference endpoint.
    #[error("embedding request failed: {0}")]
    Request(String),
    /// The backend produced an unusable result (bad shape, wrong count).
    #[error("inference failure: {0}")]
    Inference(String),
}
