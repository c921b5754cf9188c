//! Persisted recent searches.

use quickmart_core::SearchHistory;
use tokio::sync::Mutex;

use super::{load_or_default, save_logged};
use crate::storage::{DeviceStorage, StorageKey};

/// Recent searches, mirrored to the `search_history` storage key.
#[derive(Debug)]
pub struct SearchHistoryStore {
    history: Mutex<SearchHistory>,
    storage: DeviceStorage,
}

impl SearchHistoryStore {
    pub async fn load(storage: DeviceStorage) -> Self {
        let history: SearchHistory = load_or_default(&storage, StorageKey::SearchHistory).await;
        Self {
            history: Mutex::new(history),
            storage,
        }
    }

    pub async fn entries(&self) -> Vec<String> {
        self.history.lock().await.entries().to_vec()
    }

    /// Remember a query. Blank queries and repeats of the latest query are
    /// not written.
    pub async fn record(&self, query: &str) {
        let mut history = self.history.lock().await;
        if history.record(query) {
            save_logged(&self.storage, StorageKey::SearchHistory, &*history).await;
        }
    }

    pub async fn remove(&self, query: &str) -> bool {
        let mut history = self.history.lock().await;
        let removed = history.remove(query);
        if removed {
            save_logged(&self.storage, StorageKey::SearchHistory, &*history).await;
        }
        removed
    }

    pub async fn clear(&self) {
        let mut history = self.history.lock().await;
        history.clear();
        save_logged(&self.storage, StorageKey::SearchHistory, &*history).await;
    }
}
