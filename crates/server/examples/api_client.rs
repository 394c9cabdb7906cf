//! Walk through the shoestore API against a running server.
//!
//! ```sh
//! SHOESTORE_SERVER__STORE_BACKEND=memory cargo run -p shoestore-server
//! cargo run -p shoestore-server --example api_client
//! ```

use reqwest::Client;
use serde_json::json;

const SERVER_URL: &str = "http://localhost:8000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = Client::new();

    println!("1. Diagnostics:");
    let resp = client.get(format!("{SERVER_URL}/test")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("2. List (seeds an empty catalog):");
    let resp = client.get(format!("{SERVER_URL}/api/shoes")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("3. Search by brand:");
    let resp = client
        .get(format!("{SERVER_URL}/api/shoes"))
        .query(&[("brand", "nike")])
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("4. Create:");
    let resp = client
        .post(format!("{SERVER_URL}/api/shoes"))
        .json(&json!({
            "name": "Trail Blazer",
            "brand": "TestCo",
            "description": "Grippy outsole for muddy trails.",
            "price": 99.5,
            "colors": ["Olive"],
            "sizes": [8, 9, 10],
            "rating": 4.2,
            "category": "Trail",
        }))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("5. Free-text search:");
    let resp = client
        .get(format!("{SERVER_URL}/api/shoes"))
        .query(&[("q", "testco"), ("limit", "5")])
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);

    Ok(())
}
