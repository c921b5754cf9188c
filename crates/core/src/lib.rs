//! QuickMart Core - Shared types and state containers.
//!
//! This crate provides the domain types used across all QuickMart components:
//! - `storefront` - JSON API, device storage and mock backend services
//! - `cli` - Command-line tools for inspecting the catalog and device storage
//!
//! # Architecture
//!
//! The core crate contains only types and pure state containers - no I/O, no
//! timers, no storage access. Every mutation on a container returns the data
//! derived from it (for example, new cart totals), so callers never have to
//! recompute anything by hand.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, money, percentages, emails and statuses
//! - [`catalog`] - Products, categories, orders and the catalog query
//! - [`cart`] - Cart line items and total computation
//! - [`wishlist`] - Wishlist set keyed by product id
//! - [`history`] - Recent search queries
//! - [`theme`] - Theme preference
//! - [`tracking`] - Order tracking step progression
//! - [`user`] - Session user record

#![cfg_attr(not(test), forbid(unsafe_code))]

mod keyed;

pub mod cart;
pub mod catalog;
pub mod history;
pub mod theme;
pub mod tracking;
pub mod types;
pub mod user;
pub mod wishlist;

pub use cart::{Cart, CartLine, CartTotals};
pub use catalog::{
    Category, CatalogFilters, CatalogQuery, OrderLine, OrderSummary, PriceRange, Product, SortKey,
};
pub use history::SearchHistory;
pub use theme::{ColorScheme, ThemeMode};
pub use tracking::{OrderTracking, StepStatus, TrackingStep};
pub use types::*;
pub use user::User;
pub use wishlist::{Wishlist, WishlistEntry};
