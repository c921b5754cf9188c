//! Wishlist: a set of products keyed by id.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::keyed::{Keyed, KeyedItems};
use crate::types::{Percent, Price, ProductId};

/// A saved product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Percent>,
}

impl From<&Product> for WishlistEntry {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            discount: Some(product.discount),
        }
    }
}

impl Keyed for WishlistEntry {
    type Key = ProductId;

    fn key(&self) -> &ProductId {
        &self.id
    }
}

/// The wishlist. Serializes as a JSON array in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist {
    entries: KeyedItems<WishlistEntry>,
}

impl Wishlist {
    /// Add an entry unless its id is already present. Returns whether the
    /// wishlist changed.
    pub fn add(&mut self, entry: WishlistEntry) -> bool {
        self.entries.insert(entry)
    }

    /// Returns whether an entry was removed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        self.entries.remove(id).is_some()
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.entries.contains(id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> impl Iterator<Item = &WishlistEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
