//! Device storage: a small key-value store holding one JSON value per key.
//!
//! Every persisted store reads its key once at startup and rewrites the whole
//! value after each mutation. Two backends exist:
//!
//! - [`FileBackend`] - one `<key>.json` file per key in a data directory
//! - [`MemoryBackend`] - a shared in-process map, used by tests and tooling

mod file;
mod memory;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileBackend;
pub use memory::MemoryBackend;

/// The fixed set of keys written by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    User,
    Cart,
    Wishlist,
    Theme,
    SearchHistory,
}

impl StorageKey {
    pub const ALL: [Self; 5] = [
        Self::User,
        Self::Cart,
        Self::Wishlist,
        Self::Theme,
        Self::SearchHistory,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Cart => "cart",
            Self::Wishlist => "wishlist",
            Self::Theme => "theme",
            Self::SearchHistory => "search_history",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageKey {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| StorageError::UnknownKey(s.to_string()))
    }
}

/// Errors from device storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for key {key}: {source}")]
    Io {
        key: StorageKey,
        #[source]
        source: std::io::Error,
    },

    #[error("stored value for key {key} is not valid JSON: {source}")]
    Json {
        key: StorageKey,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown storage key: {0}")]
    UnknownKey(String),
}

#[derive(Debug, Clone)]
enum Backend {
    File(FileBackend),
    Memory(MemoryBackend),
}

/// Handle to device storage. Cheap to clone; clones share the same backend.
#[derive(Debug, Clone)]
pub struct DeviceStorage {
    backend: Backend,
}

impl DeviceStorage {
    /// Storage backed by `<dir>/<key>.json` files. The directory is created
    /// on first write.
    #[must_use]
    pub fn file(dir: impl Into<PathBuf>) -> Self {
        Self {
            backend: Backend::File(FileBackend::new(dir)),
        }
    }

    /// Storage that lives only as long as the process.
    #[must_use]
    pub fn memory() -> Self {
        Self {
            backend: Backend::Memory(MemoryBackend::default()),
        }
    }

    /// Read the raw stored string, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the backend cannot be read.
    pub async fn get_raw(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        match &self.backend {
            Backend::File(file) => file.get(key).await,
            Backend::Memory(memory) => Ok(memory.get(key)),
        }
    }

    /// Replace the raw stored string.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the backend cannot be written.
    pub async fn set_raw(&self, key: StorageKey, value: &str) -> Result<(), StorageError> {
        match &self.backend {
            Backend::File(file) => file.set(key, value).await,
            Backend::Memory(memory) => {
                memory.set(key, value);
                Ok(())
            }
        }
    }

    /// Delete a key. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the backend cannot be written.
    pub async fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        match &self.backend {
            Backend::File(file) => file.remove(key).await,
            Backend::Memory(memory) => {
                memory.remove(key);
                Ok(())
            }
        }
    }

    /// Read and decode a stored JSON value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` on read failure and `StorageError::Json`
    /// if the stored value does not decode as `T`.
    pub async fn load<T: DeserializeOwned>(
        &self,
        key: StorageKey,
    ) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.get_raw(key).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Json { key, source })
    }

    /// Encode and store a value as JSON, replacing whatever was there.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Json` if encoding fails and `StorageError::Io`
    /// on write failure.
    pub async fn save<T: Serialize + ?Sized>(
        &self,
        key: StorageKey,
        value: &T,
    ) -> Result<(), StorageError> {
        let raw =
            serde_json::to_string(value).map_err(|source| StorageError::Json { key, source })?;
        self.set_raw(key, &raw).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        let names: Vec<&str> = StorageKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names, ["user", "cart", "wishlist", "theme", "search_history"]);
    }

    #[test]
    fn test_key_from_str() {
        assert_eq!("search_history".parse::<StorageKey>().unwrap(), StorageKey::SearchHistory);
        assert!(matches!(
            "settings".parse::<StorageKey>(),
            Err(StorageError::UnknownKey(_))
        ));
    }

    #[tokio::test]
    async fn test_load_missing_key_is_none() {
        let storage = DeviceStorage::memory();
        let value: Option<Vec<String>> = storage.load(StorageKey::SearchHistory).await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let storage = DeviceStorage::memory();
        storage
            .save(StorageKey::SearchHistory, &vec!["milk".to_string()])
            .await
            .unwrap();
        let value: Option<Vec<String>> = storage.load(StorageKey::SearchHistory).await.unwrap();
        assert_eq!(value, Some(vec!["milk".to_string()]));
    }

    #[tokio::test]
    async fn test_load_corrupt_value_is_json_error() {
        let storage = DeviceStorage::memory();
        storage.set_raw(StorageKey::Cart, "{not json").await.unwrap();
        let result: Result<Option<Vec<String>>, _> = storage.load(StorageKey::Cart).await;
        assert!(matches!(
            result,
            Err(StorageError::Json {
                key: StorageKey::Cart,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_clones_share_backend() {
        let storage = DeviceStorage::memory();
        let other = storage.clone();
        storage.set_raw(StorageKey::Theme, "\"dark\"").await.unwrap();
        assert_eq!(
            other.get_raw(StorageKey::Theme).await.unwrap().as_deref(),
            Some("\"dark\"")
        );
        other.remove(StorageKey::Theme).await.unwrap();
        assert!(storage.get_raw(StorageKey::Theme).await.unwrap().is_none());
    }
}
