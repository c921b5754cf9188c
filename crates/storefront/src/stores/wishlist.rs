//! Persisted wishlist.

use quickmart_core::{Product, ProductId, Wishlist, WishlistEntry};
use tokio::sync::Mutex;
use tracing::instrument;

use super::{load_or_default, save_logged};
use crate::storage::{DeviceStorage, StorageKey};

/// The wishlist, mirrored to the `wishlist` storage key.
#[derive(Debug)]
pub struct WishlistStore {
    wishlist: Mutex<Wishlist>,
    storage: DeviceStorage,
}

impl WishlistStore {
    pub async fn load(storage: DeviceStorage) -> Self {
        let wishlist: Wishlist = load_or_default(&storage, StorageKey::Wishlist).await;
        Self {
            wishlist: Mutex::new(wishlist),
            storage,
        }
    }

    pub async fn entries(&self) -> Vec<WishlistEntry> {
        self.wishlist.lock().await.entries().cloned().collect()
    }

    pub async fn contains(&self, id: &ProductId) -> bool {
        self.wishlist.lock().await.contains(id)
    }

    /// Save `product`. Returns `false` if it was already saved, in which case
    /// nothing is written.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add(&self, product: &Product) -> bool {
        let mut wishlist = self.wishlist.lock().await;
        let added = wishlist.add(WishlistEntry::from(product));
        if added {
            save_logged(&self.storage, StorageKey::Wishlist, &*wishlist).await;
        }
        added
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, id: &ProductId) -> bool {
        let mut wishlist = self.wishlist.lock().await;
        let removed = wishlist.remove(id);
        if removed {
            save_logged(&self.storage, StorageKey::Wishlist, &*wishlist).await;
        }
        removed
    }

    #[instrument(skip(self))]
    pub async fn clear(&self) {
        let mut wishlist = self.wishlist.lock().await;
        wishlist.clear();
        save_logged(&self.storage, StorageKey::Wishlist, &*wishlist).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::product;

    #[tokio::test]
    async fn test_in_wishlist_iff_added_and_not_removed() {
        let store = WishlistStore::load(DeviceStorage::memory()).await;
        let id = ProductId::new("4");

        assert!(!store.contains(&id).await);
        assert!(store.add(&product("4", 179, 0)).await);
        assert!(store.contains(&id).await);
        assert!(!store.add(&product("4", 179, 0)).await);
        assert!(store.remove(&id).await);
        assert!(!store.contains(&id).await);
    }

    #[tokio::test]
    async fn test_wishlist_survives_reload() {
        let storage = DeviceStorage::memory();
        let store = WishlistStore::load(storage.clone()).await;
        store.add(&product("2", 249, 0)).await;
        store.add(&product("1", 199, 10)).await;

        let reloaded = WishlistStore::load(storage.clone()).await;
        let ids: Vec<String> = reloaded
            .entries()
            .await
            .into_iter()
            .map(|e| e.id.into_inner())
            .collect();
        assert_eq!(ids, vec!["2", "1"]);

        reloaded.clear().await;
        let raw = storage.get_raw(StorageKey::Wishlist).await.unwrap();
        assert_eq!(raw.as_deref(), Some("[]"));
    }
}
