use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_deals_url")]
    pub deals_url: String,
    #[serde(default = "default_db_path")]
    pub db_path: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Wire string, parsed by `SortKey::parse` ("relevance", "price-asc", ...).
    #[serde(default = "default_sort")]
    pub default_sort: String,
}

fn default_deals_url() -> String {
    "https://dummyjson.com/products/category/smartphones".to_string()
}

fn default_db_path() -> String {
    "data.db".to_string()
}

fn default_page_size() -> usize {
    crate::catalog::DEFAULT_PAGE_SIZE
}

fn default_http_timeout() -> u64 {
    10
}

fn default_sort() -> String {
    "relevance".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            deals_url: default_deals_url(),
            db_path: default_db_path(),
            page_size: default_page_size(),
            http_timeout_seconds: default_http_timeout(),
            default_sort: default_sort(),
        }
    }
}

/// Loads the configuration file. A missing file is not an error: the app runs
/// against the defaults. A present but unparseable file is.
pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    if !Path::new(path).exists() {
        warn!("Config file {} not found, using defaults", path);
        return Ok(AppConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}
