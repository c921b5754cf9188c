//! Catalog types and the product query.
//!
//! The query is a fixed pipeline over an in-memory product list:
//!
//! 1. category (exact id match)
//! 2. free text (case-insensitive substring of name or description)
//! 3. price range (inclusive on both ends)
//! 4. in-stock flag
//! 5. sort, only when a sort key was supplied
//!
//! There is no index and no relevance ranking; the catalog holds a few dozen
//! products.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, OrderId, OrderStatus, Percent, Price, ProductId};

/// Number of products returned by the trending list.
pub const TRENDING_LIMIT: usize = 8;

/// A product category shown on the home screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Emoji icon.
    pub icon: String,
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Image URL.
    pub image: String,
    pub category: CategoryId,
    /// Average rating out of 5.
    pub rating: f32,
    pub rating_count: u32,
    pub in_stock: bool,
    /// Discount percentage; zero when the product is not on offer.
    #[serde(default)]
    pub discount: Percent,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    /// Pack size such as "4 pcs".
    #[serde(
        default,
        rename = "quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub pack_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Whether the product opens the options sheet before adding to cart.
    #[serde(default)]
    pub has_options: bool,
}

impl Product {
    fn matches_text(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.description.to_lowercase().contains(needle_lower)
    }
}

/// A line in an order summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub price: Price,
}

/// An order as listed in the order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: OrderId,
    pub date: DateTime<Utc>,
    pub status: OrderStatus,
    pub total: Price,
    pub items: Vec<OrderLine>,
}

/// Sort orders accepted by the catalog query.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Ascending price.
    PriceLow,
    /// Descending price.
    PriceHigh,
    /// Reverse catalog order (most recently added first).
    Newest,
    /// Descending rating.
    #[default]
    Popularity,
}

impl SortKey {
    /// Parse from a query parameter. Unrecognized keys fall back to
    /// [`SortKey::Popularity`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "price_low" => Self::PriceLow,
            "price_high" => Self::PriceHigh,
            "newest" => Self::Newest,
            _ => Self::Popularity,
        }
    }

    /// Query parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PriceLow => "price_low",
            Self::PriceHigh => "price_high",
            Self::Newest => "newest",
            Self::Popularity => "popularity",
        }
    }

    fn apply(self, products: &mut Vec<Product>) {
        match self {
            Self::PriceLow => products.sort_by(|a, b| a.price.cmp(&b.price)),
            Self::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
            Self::Newest => products.reverse(),
            Self::Popularity => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        }
    }
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Price,
    pub max: Price,
}

impl PriceRange {
    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Optional refinements applied after the category and text filters.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFilters {
    pub price_range: Option<PriceRange>,
    /// Only keep products that are in stock.
    #[serde(default)]
    pub in_stock: bool,
    /// No sorting happens when this is `None`.
    pub sort_by: Option<SortKey>,
}

/// A product search.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    /// Free text; empty matches everything.
    #[serde(default)]
    pub text: String,
    pub category: Option<CategoryId>,
    #[serde(default)]
    pub filters: CatalogFilters,
}

impl CatalogQuery {
    /// A query for every product in a category.
    #[must_use]
    pub fn in_category(category: CategoryId) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    /// Run the query over `products`, preserving catalog order until the sort
    /// step.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let needle = self.text.to_lowercase();
        let mut matched: Vec<Product> = products
            .iter()
            .filter(|p| self.category.as_ref().is_none_or(|c| &p.category == c))
            .filter(|p| needle.is_empty() || p.matches_text(&needle))
            .filter(|p| {
                self.filters
                    .price_range
                    .is_none_or(|range| range.contains(p.price))
            })
            .filter(|p| !self.filters.in_stock || p.in_stock)
            .cloned()
            .collect();

        if let Some(sort) = self.filters.sort_by {
            sort.apply(&mut matched);
        }
        matched
    }
}

/// Products flagged as featured, in catalog order.
#[must_use]
pub fn featured(products: &[Product]) -> Vec<Product> {
    products.iter().filter(|p| p.featured).cloned().collect()
}

/// The highest rated products.
#[must_use]
pub fn trending(products: &[Product]) -> Vec<Product> {
    let mut sorted = products.to_vec();
    SortKey::Popularity.apply(&mut sorted);
    sorted.truncate(TRENDING_LIMIT);
    sorted
}

/// Products with a positive discount, in catalog order.
#[must_use]
pub fn discounted(products: &[Product]) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.discount.is_positive())
        .cloned()
        .collect()
}
