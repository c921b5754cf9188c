//! Order history and tracking route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use quickmart_core::{OrderId, OrderStatus, OrderSummary, OrderTracking, TrackingStep};
use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// Tracking progress for one order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingView {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub current_step: u8,
    pub estimated_minutes: u32,
    pub delivered: bool,
    pub steps: Vec<TrackingStep>,
}

impl TrackingView {
    fn new(order_id: OrderId, tracking: &OrderTracking) -> Self {
        Self {
            order_id,
            status: OrderStatus::from_step(tracking.current_step()),
            current_step: tracking.current_step(),
            estimated_minutes: tracking.estimated_minutes(),
            delivered: tracking.is_delivered(),
            steps: tracking.steps(),
        }
    }
}

/// Recent orders, newest first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<Vec<OrderSummary>> {
    Json(state.catalog().recent_orders().await)
}

#[instrument(skip(state))]
pub async fn tracking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TrackingView>> {
    let id = OrderId::new(id);
    let tracking = state.catalog().order_tracking(&id).await?;
    Ok(Json(TrackingView::new(id, &tracking)))
}
