//! QuickMart storefront library.
//!
//! JSON API over the mock grocery backend: catalog, cart, wishlist, session,
//! theme and search history persisted to device storage, plus checkout,
//! order tracking and support chat. Exposed as a library so the binary, the
//! CLI and the integration tests share one implementation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
pub mod stores;

#[cfg(test)]
mod test_support;
