//! Embedder Server - HTTP REST API for the text embedding service
//!
//! This crate is the thin transport shell around the `embedder` core. It
//! exposes:
//!
//! - **Embedding**: Single and batch text vectorization
//! - **Similarity**: Cosine similarity between two texts
//! - **Health**: Model readiness probe reporting name and dimension
//!
//! # Features
//!
//! - **Middleware**: CORS, request ID tracking, structured logging, timeouts
//! - **Configuration**: Environment variable and file-based configuration
//! - **Error Handling**: Flat `{"error": message}` responses with proper
//!   status codes
//! - **Graceful Shutdown**: Signal handling for production deployments
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Model health and dimension
//! - `POST /embed` - Embed a single text
//! - `POST /embed/batch` - Embed many texts
//! - `POST /similarity` - Cosine similarity of two texts

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
