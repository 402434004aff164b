use crate::model::{StorageError, WishlistEntry};
use crate::storage::SqliteStorage;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

const WISHLIST_KEY: &str = "wishlist";

/// Wishlist entries keyed by product id, persisted like the alert mapping:
/// one JSON document, full-document writes.
#[derive(Clone)]
pub struct WishlistStore {
    storage: Arc<Mutex<SqliteStorage>>,
}

impl WishlistStore {
    pub fn new(storage: Arc<Mutex<SqliteStorage>>) -> Self {
        Self { storage }
    }

    pub async fn get_all(&self) -> HashMap<String, WishlistEntry> {
        let stored = match self.storage.lock().await.get_value(WISHLIST_KEY) {
            Ok(value) => value,
            Err(e) => {
                warn!("Wishlist read failed: {e}");
                return HashMap::new();
            }
        };
        let Some(stored) = stored else {
            return HashMap::new();
        };
        match serde_json::from_str(&stored) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Corrupt wishlist data, treating as empty: {e}");
                HashMap::new()
            }
        }
    }

    pub async fn save_all(
        &self,
        entries: &HashMap<String, WishlistEntry>,
    ) -> Result<(), StorageError> {
        let doc = serde_json::to_string(entries)?;
        self.storage.lock().await.set_value(WISHLIST_KEY, &doc)
    }

    /// Adds the entry, or removes it when already present. Returns whether the
    /// product is on the wishlist afterwards.
    pub async fn toggle(&self, entry: WishlistEntry) -> Result<bool, StorageError> {
        let mut entries = self.get_all().await;
        if entries.remove(&entry.id).is_some() {
            self.save_all(&entries).await?;
            return Ok(false);
        }
        entries.insert(entry.id.clone(), entry);
        self.save_all(&entries).await?;
        Ok(true)
    }
}
