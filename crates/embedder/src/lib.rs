//! Embedding core for the text embedding service.
//!
//! This crate turns text into dense vectors. It owns the model lifecycle
//! (load once, share everywhere), the batching contract, and the cosine
//! similarity math. The HTTP layer lives in the `server` crate and only
//! talks to this one through [`ModelRegistry`] and [`ModelHandle`].
//!
//! Two encoder backends are supported:
//!
//! - **API mode** - Call out to a remote inference endpoint (Hugging Face
//!   feature-extraction works out of the box).
//! - **Stub mode** - For testing and development. Generates fake but
//!   consistent vectors with zero external dependencies.
//!
//! If API mode is selected but no endpoint is configured, we fall back to
//! the stub instead of refusing to start. Real API failures are surfaced,
//! not swallowed.
//!
//! ## Quick example
//!
//! ```no_run
//! use embedder::{EmbedderConfig, ModelRegistry};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), embedder::EmbedderError> {
//!     let registry = ModelRegistry::new(EmbedderConfig::default());
//!     let model = registry.get().await?;
//!     let vector = model.encode("hello world").await?;
//!     assert_eq!(vector.len(), model.dimension());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod registry;
pub mod similarity;

mod api;
mod encoder;
mod normalize;
mod stub;

pub use crate::config::EmbedderConfig;
pub use crate::encoder::TextEncoder;
pub use crate::error::EmbedderError;
pub use crate::registry::{ModelHandle, ModelRegistry};
pub use crate::similarity::cosine_similarity;
