//! Mock backend services.
//!
//! # Services
//!
//! - `catalog` - Categories, products and order history from a static catalog
//! - `auth` - Mock sign-in, sign-up and sign-out over the session store
//! - `checkout` - Delivery/payment options and order placement
//! - `chat` - Support agents and canned chat replies
//!
//! Every call resolves after a fixed delay standing in for network latency.
//! The delay is skipped when latency simulation is turned off.

pub mod auth;
pub mod catalog;
pub mod chat;
pub mod checkout;

use std::time::Duration;

/// Simulated network latency for mock backend calls.
#[derive(Debug, Clone, Copy)]
pub struct Latency {
    enabled: bool,
}

impl Latency {
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// No delays at all.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(false)
    }

    /// Sleep for `millis` when enabled.
    pub async fn wait(self, millis: u64) {
        if self.enabled {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }
}
