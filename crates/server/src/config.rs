use embedder::EmbedderConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// Maximum number of entries accepted in a batch `texts` array.
    /// Caps per-request memory alongside the body-size limit.
    #[serde(default = "default_max_batch_texts")]
    pub max_batch_texts: usize,

    /// Load the model before accepting traffic. A failed load then aborts
    /// startup instead of surfacing on the first request.
    #[serde(default = "default_true")]
    pub preload_model: bool,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Embedding model configuration
    #[serde(default)]
    pub model: EmbedderConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            max_body_size_mb: default_max_body_size_mb(),
            max_batch_texts: default_max_batch_texts(),
            preload_model: default_true(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            model: EmbedderConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config files
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("embedder").required(false))
            // Override with environment variables, e.g. EMBEDDER__PORT=9000
            // or EMBEDDER__MODEL__MODE=stub
            .add_source(config::Environment::with_prefix("EMBEDDER").separator("__"));

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8765
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_body_size_mb() -> usize {
    10
}

fn default_max_batch_texts() -> usize {
    1024
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.port, 8765);
        assert_eq!(cfg.bind_addr, "0.0.0.0");
        assert_eq!(cfg.timeout_secs, 30);
        assert_eq!(cfg.max_body_size_mb, 10);
        assert_eq!(cfg.max_batch_texts, 1024);
        assert!(cfg.preload_model);
        assert!(cfg.enable_cors);
        assert_eq!(cfg.model.model_name, "all-MiniLM-L6-v2");
    }

    #[test]
    fn test_socket_addr() {
        let cfg = ServerConfig::default();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 8765);
    }

    #[test]
    fn test_partial_deserialization() {
        let cfg: ServerConfig =
            serde_json::from_str(r#"{"port": 9000, "model": {"mode": "stub"}}"#).unwrap();
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.model.mode, "stub");
        assert_eq!(cfg.max_batch_texts, 1024);
    }
}
