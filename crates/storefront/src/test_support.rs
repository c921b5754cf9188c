//! Fixtures shared by unit tests.

use quickmart_core::{CategoryId, Percent, Price, Product, ProductId};

use crate::config::StorefrontConfig;
use crate::state::AppState;
use crate::storage::DeviceStorage;

/// A minimal in-stock product in category `1`.
pub fn product(id: &str, cents: i64, discount: u32) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        description: String::new(),
        price: Price::from_cents(cents),
        image: String::new(),
        category: CategoryId::new("1"),
        rating: 4.5,
        rating_count: 10,
        in_stock: true,
        discount: Percent::new(discount),
        featured: false,
        weight: None,
        volume: None,
        pack_size: None,
        origin: None,
        has_options: false,
    }
}

/// App state over the embedded catalog and in-memory storage, with
/// simulated latency turned off.
#[allow(clippy::expect_used)]
pub async fn app_state() -> AppState {
    AppState::load_with_storage(&StorefrontConfig::local("unused"), DeviceStorage::memory())
        .await
        .expect("embedded catalog loads")
}
