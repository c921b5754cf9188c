//! Checkout route handlers.

use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use crate::error::Result;
use crate::services::checkout::{CheckoutOptions, CheckoutSelection, CheckoutService, PlacedOrder};
use crate::state::AppState;

/// Addresses, payment methods and delivery options. Defaults are flagged
/// with `isDefault` and `defaultDeliveryOptionId`.
#[instrument]
pub async fn options() -> Json<&'static CheckoutOptions> {
    Json(CheckoutService::options())
}

/// Place an order for the current cart. Selections are taken as given:
/// a missing id is rejected rather than defaulted.
#[instrument(skip(state))]
pub async fn place_order(
    State(state): State<AppState>,
    Json(selection): Json<CheckoutSelection>,
) -> Result<(StatusCode, Json<PlacedOrder>)> {
    let placed = state.checkout().place_order(&selection).await?;
    Ok((StatusCode::CREATED, Json(placed)))
}
