//! Persisted theme preference.

use quickmart_core::ThemeMode;
use tokio::sync::Mutex;

use crate::storage::{DeviceStorage, StorageKey};

/// The theme preference, mirrored to the `theme` storage key.
#[derive(Debug)]
pub struct ThemeStore {
    mode: Mutex<ThemeMode>,
    storage: DeviceStorage,
}

impl ThemeStore {
    /// Load the stored preference. Missing, unreadable or unrecognized values
    /// fall back to [`ThemeMode::System`].
    pub async fn load(storage: DeviceStorage) -> Self {
        let mode = match storage.get_raw(StorageKey::Theme).await {
            Ok(Some(raw)) => ThemeMode::from_stored(&raw),
            Ok(None) => ThemeMode::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load theme preference");
                ThemeMode::default()
            }
        };
        Self {
            mode: Mutex::new(mode),
            storage,
        }
    }

    pub async fn mode(&self) -> ThemeMode {
        *self.mode.lock().await
    }

    /// Persist `mode` and make it current. If the write fails the previous
    /// mode stays in effect. Returns the mode now in effect.
    pub async fn set(&self, mode: ThemeMode) -> ThemeMode {
        let mut current = self.mode.lock().await;
        match self.storage.save(StorageKey::Theme, &mode).await {
            Ok(()) => *current = mode,
            Err(e) => {
                let kept = *current;
                tracing::error!(
                    error = %e,
                    requested = %mode,
                    kept = %kept,
                    "Failed to save theme preference"
                );
            }
        }
        *current
    }
}
