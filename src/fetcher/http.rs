use crate::fetcher::traits::Fetch;
use crate::model::{FetchError, RawProduct};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};

// Envelope fields tried in priority order when the body is not a bare array.
const LIST_FIELDS: &[&str] = &["products", "smartphones", "items"];

pub struct DealsFetcher {
    client: Client,
    deals_url: String,
}

impl DealsFetcher {
    pub fn new(deals_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) DealgridBot/0.1")
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, deals_url }
    }
}

#[async_trait::async_trait]
impl Fetch for DealsFetcher {
    async fn fetch(&self) -> Result<Vec<RawProduct>, FetchError> {
        info!("Fetching deals from {}", self.deals_url);

        let response = self
            .client
            .get(&self.deals_url)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text)?;
        let products = extract_products(body);
        info!("Fetched {} raw records", products.len());
        Ok(products)
    }
}

/// Pulls the product sequence out of whichever envelope the endpoint used:
/// a bare array; an object with the first present of `products`,
/// `smartphones`, `items`; an object with `data` (wrapped in a one-element
/// sequence when not already a list); anything else reads as empty.
pub fn extract_products(body: Value) -> Vec<RawProduct> {
    match body {
        Value::Array(items) => items,
        Value::Object(ref map) => {
            for field in LIST_FIELDS {
                let Some(value) = map.get(*field).filter(|v| !v.is_null()) else {
                    continue;
                };
                return match value {
                    Value::Array(items) => items.clone(),
                    _ => {
                        warn!("Envelope field '{}' is not a list, ignoring body", field);
                        Vec::new()
                    }
                };
            }
            match map.get("data").filter(|v| !v.is_null()) {
                Some(Value::Array(items)) => items.clone(),
                Some(value) => vec![value.clone()],
                None => Vec::new(),
            }
        }
        _ => Vec::new(),
    }
}
