use crate::model::{AlertError, AlertRecord, StorageError};
use crate::storage::SqliteStorage;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

const ALERTS_KEY: &str = "price_alerts";

/// Outcome of an alert bell toggle: an existing alert was removed, or the
/// interactive confirmation step should run with the suggested threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlertToggle {
    Removed,
    PromptCreate { suggested_price: f64 },
}

/// Default threshold offered to the user when creating an alert.
pub fn suggested_alert_price(current_price: f64) -> f64 {
    (current_price * 0.9).floor()
}

/// Price alerts keyed by product id, persisted as one JSON document. All
/// writes are full read-modify-write cycles; there is no partial update.
#[derive(Clone)]
pub struct AlertStore {
    storage: Arc<Mutex<SqliteStorage>>,
}

impl AlertStore {
    pub fn new(storage: Arc<Mutex<SqliteStorage>>) -> Self {
        Self { storage }
    }

    /// Reads the full alert mapping. A missing key or a corrupt document reads
    /// as an empty mapping; corruption is logged, never propagated.
    pub async fn get_all(&self) -> HashMap<String, AlertRecord> {
        let stored = match self.storage.lock().await.get_value(ALERTS_KEY) {
            Ok(value) => value,
            Err(e) => {
                warn!("Alert read failed: {e}");
                return HashMap::new();
            }
        };
        let Some(stored) = stored else {
            return HashMap::new();
        };
        match serde_json::from_str(&stored) {
            Ok(alerts) => alerts,
            Err(e) => {
                warn!("Corrupt alert data, treating as empty: {e}");
                HashMap::new()
            }
        }
    }

    /// Overwrites the persisted mapping with the given one.
    pub async fn save_all(
        &self,
        alerts: &HashMap<String, AlertRecord>,
    ) -> Result<(), StorageError> {
        let doc = serde_json::to_string(alerts)?;
        self.storage.lock().await.set_value(ALERTS_KEY, &doc)
    }

    /// Bell-toggle semantics: an existing alert for the product is removed,
    /// otherwise creation is deferred to the confirmation step, which supplies
    /// the threshold price and an optional email.
    pub async fn toggle(
        &self,
        product_id: &str,
        current_price: f64,
    ) -> Result<AlertToggle, StorageError> {
        let mut alerts = self.get_all().await;
        if alerts.remove(product_id).is_some() {
            self.save_all(&alerts).await?;
            return Ok(AlertToggle::Removed);
        }
        Ok(AlertToggle::PromptCreate {
            suggested_price: suggested_alert_price(current_price),
        })
    }

    /// Validates and persists a new alert. The threshold must be above zero
    /// and strictly below the current price.
    pub async fn create(&self, record: AlertRecord) -> Result<(), AlertError> {
        if !(record.alert_price > 0.0 && record.alert_price < record.current_price) {
            return Err(AlertError::InvalidPrice);
        }
        let mut alerts = self.get_all().await;
        alerts.insert(record.product_id.clone(), record);
        self.save_all(&alerts).await?;
        Ok(())
    }
}
