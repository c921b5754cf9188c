//! Wishlist route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use quickmart_core::{ProductId, WishlistEntry};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToWishlist {
    pub product_id: ProductId,
}

/// Response to a wishlist mutation.
#[derive(Debug, Serialize)]
pub struct WishlistUpdate {
    /// Whether the mutation changed the wishlist.
    pub changed: bool,
    pub items: Vec<WishlistEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub in_wishlist: bool,
}

#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<Vec<WishlistEntry>> {
    Json(state.wishlist().entries().await)
}

/// Add a catalog product. Adding a product already present changes nothing.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(body): Json<AddToWishlist>,
) -> Result<Json<WishlistUpdate>> {
    let product = state.catalog().product_by_id(&body.product_id).await?;
    let changed = state.wishlist().add(&product).await;
    Ok(Json(WishlistUpdate {
        changed,
        items: state.wishlist().entries().await,
    }))
}

#[instrument(skip(state))]
pub async fn contains(State(state): State<AppState>, Path(id): Path<String>) -> Json<Membership> {
    Json(Membership {
        in_wishlist: state.wishlist().contains(&ProductId::new(id)).await,
    })
}

#[instrument(skip(state))]
pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> Json<WishlistUpdate> {
    let changed = state.wishlist().remove(&ProductId::new(id)).await;
    Json(WishlistUpdate {
        changed,
        items: state.wishlist().entries().await,
    })
}

#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<WishlistUpdate> {
    state.wishlist().clear().await;
    Json(WishlistUpdate {
        changed: true,
        items: Vec::new(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use crate::routes::tests::send;
    use crate::test_support::app_state;

    #[tokio::test]
    async fn test_membership_follows_add_and_remove() {
        let state = app_state().await;
        let (_, before) = send(&state, "GET", "/api/wishlist/items/3", None).await;
        assert_eq!(before["inWishlist"], false);

        let (_, added) =
            send(&state, "POST", "/api/wishlist/items", Some(json!({"productId": "3"}))).await;
        assert_eq!(added["changed"], true);
        let (_, again) =
            send(&state, "POST", "/api/wishlist/items", Some(json!({"productId": "3"}))).await;
        assert_eq!(again["changed"], false);
        assert_eq!(again["items"].as_array().unwrap().len(), 1);

        let (_, during) = send(&state, "GET", "/api/wishlist/items/3", None).await;
        assert_eq!(during["inWishlist"], true);

        send(&state, "DELETE", "/api/wishlist/items/3", None).await;
        let (_, after) = send(&state, "GET", "/api/wishlist/items/3", None).await;
        assert_eq!(after["inWishlist"], false);
    }

    #[tokio::test]
    async fn test_clear() {
        let state = app_state().await;
        send(&state, "POST", "/api/wishlist/items", Some(json!({"productId": "1"}))).await;
        send(&state, "DELETE", "/api/wishlist", None).await;
        let (_, items) = send(&state, "GET", "/api/wishlist", None).await;
        assert!(items.as_array().unwrap().is_empty());
    }
}
