//! Insertion-ordered collection keyed by identifier.
//!
//! Cart lines and wishlist entries are looked up by product id on every
//! mutation but displayed in the order they were added. `KeyedItems` keeps a
//! hash index for lookups plus the insertion order, and serializes as a plain
//! JSON array so the stored shape stays `[{...}, {...}]`.

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An item that carries its own key.
pub trait Keyed {
    type Key: Clone + Eq + Hash;

    fn key(&self) -> &Self::Key;
}

#[derive(Debug, Clone)]
pub struct KeyedItems<V: Keyed> {
    order: Vec<V::Key>,
    items: HashMap<V::Key, V>,
}

impl<V: Keyed> Default for KeyedItems<V> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            items: HashMap::new(),
        }
    }
}

impl<V: Keyed> KeyedItems<V> {
    /// Build from a list, keeping the first occurrence of each key.
    pub fn from_vec(values: Vec<V>) -> Self {
        let mut out = Self::default();
        for value in values {
            out.insert(value);
        }
        out
    }

    pub fn get(&self, key: &V::Key) -> Option<&V> {
        self.items.get(key)
    }

    pub fn get_mut(&mut self, key: &V::Key) -> Option<&mut V> {
        self.items.get_mut(key)
    }

    pub fn contains(&self, key: &V::Key) -> bool {
        self.items.contains_key(key)
    }

    /// Insert at the end. Returns `false` and leaves the collection untouched
    /// if the key is already present.
    pub fn insert(&mut self, value: V) -> bool {
        let key = value.key().clone();
        if self.items.contains_key(&key) {
            return false;
        }
        self.order.push(key.clone());
        self.items.insert(key, value);
        true
    }

    pub fn remove(&mut self, key: &V::Key) -> Option<V> {
        let removed = self.items.remove(key)?;
        self.order.retain(|k| k != key);
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.order.iter().filter_map(|key| self.items.get(key))
    }
}

impl<V: Keyed + Serialize> Serialize for KeyedItems<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, V: Keyed + Deserialize<'de>> Deserialize<'de> for KeyedItems<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<V>::deserialize(deserializer).map(Self::from_vec)
    }
}
