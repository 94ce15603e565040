//! Examples for using the Embedder Server API

use reqwest::Client;
use serde_json::json;

const SERVER_URL: &str = "http://localhost:8765";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = Client::new();

    // Example 1: Health check
    println!("1. Health Check:");
    let resp = client.get(format!("{SERVER_URL}/health")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 2: Embed a single text
    println!("2. Embed Single Text:");
    let resp = client
        .post(format!("{SERVER_URL}/embed"))
        .json(&json!({
            "text": "This is a sample sentence for embedding."
        }))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 3: Batch embed texts
    println!("3. Batch Embed Texts:");
    let resp = client
        .post(format!("{SERVER_URL}/embed/batch"))
        .json(&json!({
            "texts": [
                "First sentence in the batch.",
                "Second sentence in the batch.",
                "Third sentence in the batch."
            ],
            "batch_size": 2
        }))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 4: Similarity between two texts
    println!("4. Similarity:");
    let resp = client
        .post(format!("{SERVER_URL}/similarity"))
        .json(&json!({
            "text1": "The cat sat on the mat.",
            "text2": "A feline rested on the rug."
        }))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("All examples completed!");
    Ok(())
}
