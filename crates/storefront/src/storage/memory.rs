//! In-memory device storage.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::StorageKey;

/// A shared map of key to raw JSON string.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    values: Arc<RwLock<HashMap<StorageKey, String>>>,
}

impl MemoryBackend {
    pub(super) fn get(&self, key: StorageKey) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned()
    }

    pub(super) fn set(&self, key: StorageKey, value: &str) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value.to_string());
    }

    pub(super) fn remove(&self, key: StorageKey) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&key);
    }
}
