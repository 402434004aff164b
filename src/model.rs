// Core structs: Product, AlertRecord, WishlistEntry
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw record as delivered by the deals endpoint. Field names are inconsistent
/// across sources, so nothing is typed until normalization.
pub type RawProduct = serde_json::Value;

/// A listing price: numeric when the source value parses, otherwise the
/// literal display string ("N/A" when the source carries no price at all).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Amount(f64),
    Text(String),
}

impl PriceValue {
    pub fn amount(&self) -> Option<f64> {
        match self {
            PriceValue::Amount(v) => Some(*v),
            PriceValue::Text(_) => None,
        }
    }

    /// Numeric view used for ordering; non-numeric prices compare as 0.
    pub fn or_zero(&self) -> f64 {
        self.amount().unwrap_or(0.0)
    }
}

impl std::fmt::Display for PriceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceValue::Amount(v) => write!(f, "${v:.2}"),
            PriceValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Canonical product shape, rebuilt from scratch on every fetch. The `id` is
/// the only identity that survives across fetches; alerts and wishlist entries
/// are keyed by it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: Option<String>,
    pub current_price: PriceValue,
    pub original_price: Option<PriceValue>,
    pub discount: Option<String>,
    pub image_url: Option<String>,
    /// Spec lines in fixed order: storage, ram, display.
    pub specs: Vec<String>,
    pub retailer_count: u32,
}

/// A user-created threshold price for one product. The whole collection is
/// persisted as a single JSON document keyed by product id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRecord {
    pub product_id: String,
    pub product_name: String,
    pub current_price: f64,
    pub alert_price: f64,
    #[serde(default)]
    pub email: String,
    pub date_created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    pub id: String,
    pub name: String,
    pub price: PriceValue,
    pub image: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Body(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("cannot serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum AlertError {
    #[error("alert price must be above zero and below the current price")]
    InvalidPrice,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}
