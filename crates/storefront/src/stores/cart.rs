//! Persisted cart.

use quickmart_core::{Cart, CartLine, CartTotals, Product, ProductId};
use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard};
use tracing::instrument;

use super::{load_or_default, save_logged};
use crate::storage::{DeviceStorage, StorageKey};

/// Cart contents with derived totals, as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSnapshot {
    pub items: Vec<CartLine>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartSnapshot {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().cloned().collect(),
            totals: cart.totals(),
        }
    }
}

/// The cart, mirrored to the `cart` storage key.
///
/// Mutations return the snapshot taken under the same lock as the change.
#[derive(Debug)]
pub struct CartStore {
    cart: Mutex<Cart>,
    checkout: Mutex<()>,
    storage: DeviceStorage,
}

impl CartStore {
    /// Load the stored cart. A missing or unreadable value yields an empty
    /// cart.
    pub async fn load(storage: DeviceStorage) -> Self {
        let cart: Cart = load_or_default(&storage, StorageKey::Cart).await;
        tracing::debug!(lines = cart.lines().count(), "Cart loaded");
        Self {
            cart: Mutex::new(cart),
            checkout: Mutex::new(()),
            storage,
        }
    }

    pub async fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::from(&*self.cart.lock().await)
    }

    /// Add one unit of `product`.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add(&self, product: &Product) -> CartSnapshot {
        self.mutate(|cart| {
            cart.add_product(product);
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, id: &ProductId) -> CartSnapshot {
        self.mutate(|cart| {
            cart.remove(id);
        })
        .await
    }

    /// Set a line's quantity; zero or below removes it.
    #[instrument(skip(self))]
    pub async fn update_quantity(&self, id: &ProductId, quantity: i64) -> CartSnapshot {
        self.mutate(|cart| {
            cart.update_quantity(id, quantity);
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn clear(&self) -> CartSnapshot {
        self.mutate(|cart| {
            cart.clear();
        })
        .await
    }

    /// Hold the checkout slot. Only one order is placed from this cart at a
    /// time; other callers wait until the guard drops.
    pub async fn begin_checkout(&self) -> MutexGuard<'_, ()> {
        self.checkout.lock().await
    }

    /// Take ordered lines out of the cart.
    ///
    /// Each line's quantity drops by the ordered quantity, so units added
    /// while the order was processing stay in the cart.
    #[instrument(skip(self, ordered), fields(lines = ordered.len()))]
    pub async fn remove_ordered(&self, ordered: &[CartLine]) -> CartSnapshot {
        self.mutate(|cart| {
            for line in ordered {
                if let Some(current) = cart.get(&line.id) {
                    let left = i64::from(current.quantity) - i64::from(line.quantity);
                    cart.update_quantity(&line.id, left);
                }
            }
        })
        .await
    }

    async fn mutate(&self, change: impl FnOnce(&mut Cart)) -> CartSnapshot {
        let mut cart = self.cart.lock().await;
        change(&mut cart);
        let lines: Vec<&CartLine> = cart.lines().collect();
        save_logged(&self.storage, StorageKey::Cart, &lines).await;
        CartSnapshot::from(&*cart)
    }
}
