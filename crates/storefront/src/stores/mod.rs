//! Persisted state containers.
//!
//! Each store owns one `quickmart-core` container behind a `tokio` mutex and
//! mirrors it to a single device-storage key. A mutation holds the lock until
//! its storage write has finished, so writes for a key land in order.
//!
//! Cart, wishlist, theme and search-history storage failures are logged and
//! swallowed; the in-memory state carries on. Session writes are the
//! exception and report failures to the caller.

mod cart;
mod history;
mod session;
mod theme;
mod wishlist;

pub use cart::{CartSnapshot, CartStore};
pub use history::SearchHistoryStore;
pub use session::SessionStore;
pub use theme::ThemeStore;
pub use wishlist::WishlistStore;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::storage::{DeviceStorage, StorageKey};

/// Load a stored value, falling back to the default when it is missing or
/// unreadable.
async fn load_or_default<T: DeserializeOwned + Default>(
    storage: &DeviceStorage,
    key: StorageKey,
) -> T {
    match storage.load(key).await {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Failed to load from storage");
            T::default()
        }
    }
}

/// Write a value, logging instead of returning failures.
async fn save_logged<T: Serialize + ?Sized>(storage: &DeviceStorage, key: StorageKey, value: &T) {
    if let Err(e) = storage.save(key, value).await {
        tracing::error!(key = %key, error = %e, "Failed to save to storage");
    }
}
