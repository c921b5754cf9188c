//! Cart route handlers.
//!
//! Every mutation responds with the full cart so clients never recompute
//! totals themselves.

use axum::{
    Json,
    extract::{Path, State},
};
use quickmart_core::ProductId;
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;
use crate::stores::CartSnapshot;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCart {
    pub product_id: ProductId,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantity {
    /// Zero or below removes the line.
    pub quantity: i64,
}

#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartSnapshot> {
    Json(state.cart().snapshot().await)
}

/// Add one unit of a catalog product.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(body): Json<AddToCart>,
) -> Result<Json<CartSnapshot>> {
    let product = state.catalog().product_by_id(&body.product_id).await?;
    Ok(Json(state.cart().add(&product).await))
}

#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateQuantity>,
) -> Json<CartSnapshot> {
    Json(
        state
            .cart()
            .update_quantity(&ProductId::new(id), body.quantity)
            .await,
    )
}

#[instrument(skip(state))]
pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> Json<CartSnapshot> {
    Json(state.cart().remove(&ProductId::new(id)).await)
}

#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartSnapshot> {
    Json(state.cart().clear().await)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::tests::send;
    use crate::test_support::app_state;

    #[tokio::test]
    async fn test_add_twice_increments_quantity() {
        let state = app_state().await;
        send(&state, "POST", "/api/cart/items", Some(json!({"productId": "1"}))).await;
        let (status, cart) =
            send(&state, "POST", "/api/cart/items", Some(json!({"productId": "1"}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(cart["items"].as_array().unwrap().len(), 1);
        assert_eq!(cart["items"][0]["quantity"], 2);
        assert_eq!(cart["totals"]["totalItems"], 2);
    }

    #[tokio::test]
    async fn test_zero_quantity_removes_line() {
        let state = app_state().await;
        send(&state, "POST", "/api/cart/items", Some(json!({"productId": "1"}))).await;
        let (_, cart) =
            send(&state, "PUT", "/api/cart/items/1", Some(json!({"quantity": 0}))).await;
        assert!(cart["items"].as_array().unwrap().is_empty());
        assert_eq!(cart["totals"]["total"], 0.0);
    }

    #[tokio::test]
    async fn test_unknown_product_is_404() {
        let state = app_state().await;
        let (status, _) =
            send(&state, "POST", "/api/cart/items", Some(json!({"productId": "999"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(state.cart().snapshot().await.items.is_empty());
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let state = app_state().await;
        send(&state, "POST", "/api/cart/items", Some(json!({"productId": "1"}))).await;
        send(&state, "POST", "/api/cart/items", Some(json!({"productId": "2"}))).await;

        let (_, cart) = send(&state, "DELETE", "/api/cart/items/1", None).await;
        assert_eq!(cart["items"].as_array().unwrap().len(), 1);
        assert_eq!(cart["items"][0]["id"], "2");

        let (_, cart) = send(&state, "DELETE", "/api/cart", None).await;
        assert!(cart["items"].as_array().unwrap().is_empty());
    }
}
