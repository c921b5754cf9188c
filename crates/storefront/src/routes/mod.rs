//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                          - Liveness check
//!
//! # Catalog
//! GET    /api/categories                  - Categories
//! GET    /api/categories/{id}/products    - Products in a category
//! GET    /api/products                    - Search (?q=&category=&min_price=&max_price=&in_stock=&sort=)
//! GET    /api/products/featured           - Featured products
//! GET    /api/products/trending           - Highest rated products
//! GET    /api/products/discounted         - Products on offer
//! GET    /api/products/{id}               - Product detail
//!
//! # Orders
//! GET    /api/orders                      - Recent orders
//! GET    /api/orders/{id}/tracking        - Tracking progress
//!
//! # Cart
//! GET    /api/cart                        - Items and totals
//! POST   /api/cart/items                  - Add one unit
//! PUT    /api/cart/items/{id}             - Set quantity (0 removes)
//! DELETE /api/cart/items/{id}             - Remove line
//! DELETE /api/cart                        - Empty the cart
//!
//! # Wishlist
//! GET    /api/wishlist                    - Entries
//! POST   /api/wishlist/items              - Add
//! GET    /api/wishlist/items/{id}         - Membership
//! DELETE /api/wishlist/items/{id}         - Remove
//! DELETE /api/wishlist                    - Clear
//!
//! # Auth
//! GET    /api/session                     - Current user or null
//! POST   /api/auth/sign-in                - Sign in
//! POST   /api/auth/sign-up                - Register
//! POST   /api/auth/sign-out               - Sign out
//!
//! # Settings and search history
//! GET    /api/settings/theme              - Theme preference (?system=light|dark)
//! PUT    /api/settings/theme              - Change theme preference
//! GET    /api/search/history              - Recent searches
//! DELETE /api/search/history              - Clear recent searches
//! DELETE /api/search/history/{query}      - Remove one search
//!
//! # Checkout
//! GET    /api/checkout/options            - Addresses, payment methods, delivery options
//! POST   /api/checkout                    - Place order
//!
//! # Support
//! GET    /api/support/agent               - Random online agent
//! GET    /api/support/messages            - Conversation
//! POST   /api/support/messages            - Send a message and get a reply
//! POST   /api/support/send                - Send receipt only
//! POST   /api/support/auto-reply          - Canned agent reply
//! ```

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod search;
pub mod settings;
pub mod support;
pub mod wishlist;

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(catalog::categories))
        .route("/categories/{id}/products", get(catalog::category_products))
        .route("/products", get(catalog::search))
        .route("/products/featured", get(catalog::featured))
        .route("/products/trending", get(catalog::trending))
        .route("/products/discounted", get(catalog::discounted))
        .route("/products/{id}", get(catalog::show))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}/tracking", get(orders::tracking))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/items", post(cart::add))
        .route("/items/{id}", put(cart::update).delete(cart::remove))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show).delete(wishlist::clear))
        .route("/items", post(wishlist::add))
        .route("/items/{id}", get(wishlist::contains).delete(wishlist::remove))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/sign-in", post(auth::sign_in))
        .route("/sign-up", post(auth::sign_up))
        .route("/sign-out", post(auth::sign_out))
}

/// Create the support chat routes router.
pub fn support_routes() -> Router<AppState> {
    Router::new()
        .route("/agent", get(support::agent))
        .route("/messages", get(support::messages).post(support::post_message))
        .route("/send", post(support::send))
        .route("/auto-reply", post(support::auto_reply))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(catalog_routes())
        .nest("/orders", order_routes())
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .route("/session", get(auth::session))
        .nest("/auth", auth_routes())
        .route(
            "/settings/theme",
            get(settings::theme).put(settings::set_theme),
        )
        .route("/search/history", get(search::history).delete(search::clear))
        .route("/search/history/{query}", delete(search::remove))
        .route("/checkout/options", get(checkout::options))
        .route("/checkout", post(checkout::place_order))
        .nest("/support", support_routes())
}

/// The complete application: health check, API routes, request tracing and
/// request ids.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                .layer(middleware::from_fn(request_id_middleware)),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

fn make_request_span(request: &axum::http::Request<axum::body::Body>) -> tracing::Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = tracing::field::Empty,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::middleware::REQUEST_ID_HEADER;
    use crate::test_support::app_state;

    /// Send a request to a fresh app and decode the JSON response.
    pub(crate) async fn send(
        state: &AppState,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(app_state().await)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let state = app_state().await;
        let (status, _) = send(&state, "GET", "/api/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
