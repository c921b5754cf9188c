//! Mock catalog backend.
//!
//! Serves categories, products and order history from a static JSON catalog
//! (embedded at build time, or read from a file at startup). Orders placed
//! through checkout are appended to the history in memory.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use quickmart_core::catalog;
use quickmart_core::{
    CatalogQuery, Category, CategoryId, OrderId, OrderLine, OrderStatus, OrderSummary,
    OrderTracking, Price, Product, ProductId,
};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::instrument;

use super::Latency;

const EMBEDDED_CATALOG: &str = include_str!("../../data/catalog.json");

const CATEGORIES_DELAY_MS: u64 = 500;
const FEATURED_DELAY_MS: u64 = 800;
const RECENT_ORDERS_DELAY_MS: u64 = 600;
const PRODUCT_DELAY_MS: u64 = 500;
const SEARCH_DELAY_MS: u64 = 1000;
const CATEGORY_PRODUCTS_DELAY_MS: u64 = 800;
const TRENDING_DELAY_MS: u64 = 800;
const DISCOUNTED_DELAY_MS: u64 = 800;

/// Order number used when the catalog has no numeric order ids.
const FIRST_ORDER_NUMBER: u64 = 1001;

/// Errors from the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Product not found")]
    ProductNotFound(ProductId),

    #[error("Order not found")]
    OrderNotFound(OrderId),

    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The static catalog document.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogData {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    #[serde(default)]
    pub orders: Vec<OrderSummary>,
}

impl CatalogData {
    /// The catalog compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the embedded document is malformed.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if `json` is not a catalog document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a catalog document from disk.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Read` if the file cannot be read and
    /// `CatalogError::Parse` if it is not a catalog document.
    pub async fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&json)
    }
}

/// An order in the history. Seeded orders have no placement time and are
/// always reported as delivered.
#[derive(Debug, Clone)]
struct OrderRecord {
    summary: OrderSummary,
    placed_at: Option<Instant>,
}

impl OrderRecord {
    fn tracking(&self) -> OrderTracking {
        self.placed_at.map_or_else(OrderTracking::delivered, |placed| {
            OrderTracking::at_elapsed(placed.elapsed())
        })
    }

    /// The summary with its status brought up to date with tracking.
    fn current_summary(&self) -> OrderSummary {
        let mut summary = self.summary.clone();
        if self.placed_at.is_some() {
            summary.status = OrderStatus::from_step(self.tracking().current_step());
        }
        summary
    }
}

/// Mock catalog backend.
#[derive(Debug)]
pub struct CatalogService {
    categories: Vec<Category>,
    products: Vec<Product>,
    /// Most recent first.
    orders: RwLock<Vec<OrderRecord>>,
    next_order_number: AtomicU64,
    latency: Latency,
}

impl CatalogService {
    #[must_use]
    pub fn new(data: CatalogData, latency: Latency) -> Self {
        let next_order_number = data
            .orders
            .iter()
            .filter_map(|order| order.id.as_str().parse::<u64>().ok())
            .max()
            .map_or(FIRST_ORDER_NUMBER, |n| n + 1);

        let orders = data
            .orders
            .into_iter()
            .map(|summary| OrderRecord {
                summary,
                placed_at: None,
            })
            .collect();

        Self {
            categories: data.categories,
            products: data.products,
            orders: RwLock::new(orders),
            next_order_number: AtomicU64::new(next_order_number),
            latency,
        }
    }

    #[instrument(skip(self))]
    pub async fn categories(&self) -> Vec<Category> {
        self.latency.wait(CATEGORIES_DELAY_MS).await;
        self.categories.clone()
    }

    #[instrument(skip(self))]
    pub async fn featured_products(&self) -> Vec<Product> {
        self.latency.wait(FEATURED_DELAY_MS).await;
        catalog::featured(&self.products)
    }

    /// Order history, most recent first.
    #[instrument(skip(self))]
    pub async fn recent_orders(&self) -> Vec<OrderSummary> {
        self.latency.wait(RECENT_ORDERS_DELAY_MS).await;
        self.orders
            .read()
            .await
            .iter()
            .map(OrderRecord::current_summary)
            .collect()
    }

    /// # Errors
    ///
    /// Returns `CatalogError::ProductNotFound` if no product has this id.
    #[instrument(skip(self))]
    pub async fn product_by_id(&self, id: &ProductId) -> Result<Product, CatalogError> {
        self.latency.wait(PRODUCT_DELAY_MS).await;
        self.products
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::ProductNotFound(id.clone()))
    }

    #[instrument(skip(self))]
    pub async fn search(&self, query: &CatalogQuery) -> Vec<Product> {
        self.latency.wait(SEARCH_DELAY_MS).await;
        let results = query.apply(&self.products);
        tracing::debug!(results = results.len(), "Catalog search");
        results
    }

    #[instrument(skip(self))]
    pub async fn products_by_category(&self, category: &CategoryId) -> Vec<Product> {
        self.latency.wait(CATEGORY_PRODUCTS_DELAY_MS).await;
        CatalogQuery::in_category(category.clone()).apply(&self.products)
    }

    #[instrument(skip(self))]
    pub async fn trending_products(&self) -> Vec<Product> {
        self.latency.wait(TRENDING_DELAY_MS).await;
        catalog::trending(&self.products)
    }

    #[instrument(skip(self))]
    pub async fn discounted_products(&self) -> Vec<Product> {
        self.latency.wait(DISCOUNTED_DELAY_MS).await;
        catalog::discounted(&self.products)
    }

    /// Tracking progress for an order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::OrderNotFound` if the order is not in the
    /// history.
    pub async fn order_tracking(&self, id: &OrderId) -> Result<OrderTracking, CatalogError> {
        self.orders
            .read()
            .await
            .iter()
            .find(|order| &order.summary.id == id)
            .map(OrderRecord::tracking)
            .ok_or_else(|| CatalogError::OrderNotFound(id.clone()))
    }

    /// Add a newly placed order to the front of the history. It starts out
    /// confirmed and is tracked from now.
    pub async fn record_order(&self, items: Vec<OrderLine>, total: Price) -> OrderSummary {
        let number = self.next_order_number.fetch_add(1, Ordering::Relaxed);
        let summary = OrderSummary {
            id: OrderId::new(number.to_string()),
            date: Utc::now(),
            status: OrderStatus::Confirmed,
            total,
            items,
        };
        self.orders.write().await.insert(
            0,
            OrderRecord {
                summary: summary.clone(),
                placed_at: Some(Instant::now()),
            },
        );
        tracing::info!(order_id = %summary.id, total = %summary.total, "Order recorded");
        summary
    }
}
