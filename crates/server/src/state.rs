use crate::config::ServerConfig;
use embedder::ModelRegistry;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Model registry (shared across requests; loads the model once)
    pub registry: Arc<ModelRegistry>,
}

impl ServerState {
    /// Create new server state. The model itself is not loaded here; the
    /// registry defers that to the first request (or to the startup
    /// preload when configured).
    pub fn new(config: ServerConfig) -> Self {
        let registry = Arc::new(ModelRegistry::new(config.model.clone()));
        Self {
            config: Arc::new(config),
            registry,
        }
    }
}
