//! Cart line items and totals.
//!
//! ```
//! use quickmart_core::{Cart, CartLine, Percent, Price, ProductId};
//!
//! let mut cart = Cart::default();
//! cart.add(CartLine::new(ProductId::new("1"), "Spinach", Price::from_cents(1000), "", Some(Percent::new(10))));
//! let totals = cart.add(CartLine::new(ProductId::new("1"), "Spinach", Price::from_cents(1000), "", Some(Percent::new(10))));
//!
//! assert_eq!(totals.subtotal, Price::from_cents(2000));
//! assert_eq!(totals.discount, Price::from_cents(200));
//! assert_eq!(totals.total, Price::from_cents(1800));
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::keyed::{Keyed, KeyedItems};
use crate::types::{Percent, Price, ProductId};

/// A product in the cart with its quantity.
///
/// Name, price, image and discount are copied from the product when it is
/// first added and are not refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Percent>,
}

impl CartLine {
    /// A new line with quantity 1.
    #[must_use]
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Price,
        image: impl Into<String>,
        discount: Option<Percent>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            image: image.into(),
            quantity: 1,
            discount,
        }
    }

    /// `price × quantity`.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.price * self.quantity
    }

    /// `price × quantity × discount / 100`, zero without a discount.
    #[must_use]
    pub fn discount_amount(&self) -> Price {
        self.discount
            .map_or(Price::ZERO, |pct| pct.of(self.subtotal()))
    }
}

impl From<&Product> for CartLine {
    fn from(product: &Product) -> Self {
        Self::new(
            product.id.clone(),
            product.name.clone(),
            product.price,
            product.image.clone(),
            Some(product.discount),
        )
    }
}

impl Keyed for CartLine {
    type Key = ProductId;

    fn key(&self) -> &ProductId {
        &self.id
    }
}

/// Values derived from the cart contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Sum of quantities.
    pub total_items: u32,
    pub subtotal: Price,
    pub discount: Price,
    /// `subtotal - discount`.
    pub total: Price,
}

impl CartTotals {
    /// Compute totals over a set of lines.
    pub fn compute<'a>(lines: impl IntoIterator<Item = &'a CartLine>) -> Self {
        let mut totals = Self::default();
        for line in lines {
            totals.total_items = totals.total_items.saturating_add(line.quantity);
            totals.subtotal = totals.subtotal + line.subtotal();
            totals.discount = totals.discount + line.discount_amount();
        }
        totals.total = totals.subtotal - totals.discount;
        totals
    }
}

/// The shopping cart.
///
/// Serializes as the JSON array of lines kept in device storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: KeyedItems<CartLine>,
}

impl Cart {
    /// Build a cart from stored lines. Lines with a zero quantity are dropped
    /// and repeated ids keep their first occurrence.
    #[must_use]
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let lines = lines.into_iter().filter(|l| l.quantity > 0).collect();
        Self {
            lines: KeyedItems::from_vec(lines),
        }
    }

    /// Add one unit. An id already in the cart has its quantity incremented
    /// instead of getting a second line.
    pub fn add(&mut self, line: CartLine) -> CartTotals {
        if let Some(existing) = self.lines.get_mut(&line.id) {
            existing.quantity = existing.quantity.saturating_add(1);
        } else {
            self.lines.insert(CartLine { quantity: 1, ..line });
        }
        self.totals()
    }

    /// Add one unit of a catalog product.
    pub fn add_product(&mut self, product: &Product) -> CartTotals {
        self.add(CartLine::from(product))
    }

    /// Remove a line entirely. Unknown ids are ignored.
    pub fn remove(&mut self, id: &ProductId) -> CartTotals {
        self.lines.remove(id);
        self.totals()
    }

    /// Set the quantity of a line. Zero or below removes it; unknown ids are
    /// ignored.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) -> CartTotals {
        if quantity <= 0 {
            self.lines.remove(id);
        } else if let Some(line) = self.lines.get_mut(id) {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
        self.totals()
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> CartTotals {
        self.lines.clear();
        self.totals()
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.get(id)
    }

    /// Lines in the order they were first added.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals::compute(self.lines.iter())
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Self::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines().cloned().collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(id: &str, cents: i64, discount: Option<u32>) -> CartLine {
        CartLine::new(
            ProductId::new(id),
            format!("Item {id}"),
            Price::from_cents(cents),
            "",
            discount.map(Percent::new),
        )
    }

    #[test]
    fn test_totals_example() {
        let mut cart = Cart::default();
        cart.add(line("1", 1000, Some(10)));
        let totals = cart.add(line("1", 1000, Some(10)));
        assert_eq!(totals.total_items, 2);
        assert_eq!(totals.subtotal, Price::from_cents(2000));
        assert_eq!(totals.discount, Price::from_cents(200));
        assert_eq!(totals.total, Price::from_cents(1800));
    }

    #[test]
    fn test_totals_over_mixed_lines() {
        let cart = Cart::from_lines(vec![
            CartLine {
                quantity: 2,
                ..line("1", 199, Some(10))
            },
            CartLine {
                quantity: 3,
                ..line("2", 249, None)
            },
            line("3", 399, Some(0)),
        ]);
        let totals = cart.totals();
        // 3.98 + 7.47 + 3.99
        assert_eq!(totals.subtotal, Price::from_cents(1544));
        // 3.98 * 10%
        assert_eq!(totals.discount, Price::new(rust_decimal::Decimal::new(398, 3)));
        assert_eq!(totals.total_items, 6);
    }

    #[test]
    fn test_add_existing_increments_instead_of_duplicating() {
        let mut cart = Cart::default();
        cart.add(line("1", 100, None));
        cart.add(line("2", 100, None));
        cart.add(line("1", 100, None));
        assert_eq!(cart.lines().count(), 2);
        assert_eq!(cart.get(&ProductId::new("1")).unwrap().quantity, 2);
    }

    #[test]
    fn test_add_ignores_incoming_quantity() {
        let mut cart = Cart::default();
        cart.add(CartLine {
            quantity: 7,
            ..line("1", 100, None)
        });
        assert_eq!(cart.get(&ProductId::new("1")).unwrap().quantity, 1);
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes() {
        let mut cart = Cart::from_lines(vec![line("1", 100, None), line("2", 100, None)]);
        cart.update_quantity(&ProductId::new("1"), 0);
        cart.update_quantity(&ProductId::new("2"), -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_sets_value_and_ignores_unknown_ids() {
        let mut cart = Cart::from_lines(vec![line("1", 250, None)]);
        let totals = cart.update_quantity(&ProductId::new("1"), 4);
        assert_eq!(totals.subtotal, Price::from_cents(1000));
        let totals = cart.update_quantity(&ProductId::new("missing"), 5);
        assert_eq!(totals.total_items, 4);
        assert!(cart.get(&ProductId::new("missing")).is_none());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::from_lines(vec![line("1", 100, None), line("2", 100, None)]);
        let totals = cart.remove(&ProductId::new("1"));
        assert_eq!(totals.total_items, 1);
        let totals = cart.clear();
        assert_eq!(totals, CartTotals::default());
    }

    #[test]
    fn test_stored_json_round_trips_as_array() {
        let json = r#"[
            {"id":"1","name":"Fresh Spinach","price":1.99,"image":"a.jpg","quantity":2,"discount":10},
            {"id":"7","name":"Sourdough Bread","price":4.99,"image":"b.jpg","quantity":1}
        ]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        let ids: Vec<&str> = cart.lines().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "7"]);
        assert_eq!(cart.totals().subtotal, Price::from_cents(897));

        let value = serde_json::to_value(&cart).unwrap();
        assert!(value.is_array());
        assert!(value[1].get("discount").is_none());
    }

    #[test]
    fn test_from_lines_drops_zero_quantities() {
        let cart = Cart::from_lines(vec![CartLine {
            quantity: 0,
            ..line("1", 100, None)
        }]);
        assert!(cart.is_empty());
    }
}
