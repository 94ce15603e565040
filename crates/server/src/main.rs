//! Embedder Server - HTTP REST API for the text embedding service
//!
//! This binary exposes the embedding core over REST: single and batch
//! embedding plus pairwise cosine similarity.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;

    // Start server
    server::start_server(config).await?;

    Ok(())
}
