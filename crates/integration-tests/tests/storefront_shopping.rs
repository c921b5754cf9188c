//! Shopping flows against a running storefront: browsing, cart, wishlist
//! and checkout.

#![allow(clippy::unwrap_used)]

use quickmart_core::Product;
use quickmart_integration_tests::TestContext;
use reqwest::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new().await.unwrap();
    let response = ctx
        .client
        .get(format!("{}/health", ctx.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_category_search_sorted_by_price() {
    let ctx = TestContext::new().await.unwrap();
    let (status, body) = ctx
        .get("/api/products?category=1&sort=price_low")
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK);

    let products: Vec<Product> = serde_json::from_value(body).unwrap();
    assert!(!products.is_empty());
    assert!(products.iter().all(|p| p.category.as_str() == "1"));
    assert!(products.windows(2).all(|w| w[0].price <= w[1].price));
}

#[tokio::test]
async fn test_unknown_product_is_404() {
    let ctx = TestContext::new().await.unwrap();
    let (status, body) = ctx.get("/api/products/does-not-exist").await.unwrap();
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Product not found"}));
}

#[tokio::test]
async fn test_cart_totals() {
    let ctx = TestContext::new().await.unwrap();
    // Product 1 is 1.99, product 3 is 3.99
    ctx.post("/api/cart/items", json!({"productId": "1"}))
        .await
        .unwrap();
    ctx.post("/api/cart/items", json!({"productId": "1"}))
        .await
        .unwrap();
    let (_, cart) = ctx
        .post("/api/cart/items", json!({"productId": "3"}))
        .await
        .unwrap();

    assert_eq!(cart["items"].as_array().unwrap().len(), 2);
    assert_eq!(cart["totals"]["totalItems"], 3);
    assert_eq!(cart["totals"]["subtotal"], 7.97);

    let subtotal = cart["totals"]["subtotal"].as_f64().unwrap();
    let discount = cart["totals"]["discount"].as_f64().unwrap();
    let total = cart["totals"]["total"].as_f64().unwrap();
    assert!((subtotal - discount - total).abs() < 1e-9);

    let (_, cart) = ctx
        .request(
            Method::PUT,
            "/api/cart/items/3",
            Some(json!({"quantity": 0})),
        )
        .await
        .unwrap();
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);
    assert_eq!(cart["totals"]["totalItems"], 2);
}

#[tokio::test]
async fn test_wishlist_membership() {
    let ctx = TestContext::new().await.unwrap();
    ctx.post("/api/wishlist/items", json!({"productId": "5"}))
        .await
        .unwrap();

    let (_, member) = ctx.get("/api/wishlist/items/5").await.unwrap();
    assert_eq!(member["inWishlist"], true);

    ctx.request(Method::DELETE, "/api/wishlist/items/5", None)
        .await
        .unwrap();
    let (_, member) = ctx.get("/api/wishlist/items/5").await.unwrap();
    assert_eq!(member["inWishlist"], false);
}

#[tokio::test]
async fn test_checkout_places_order() {
    let ctx = TestContext::new().await.unwrap();
    ctx.post("/api/cart/items", json!({"productId": "2"}))
        .await
        .unwrap();

    let (status, placed) = ctx
        .post(
            "/api/checkout",
            json!({"addressId": "2", "paymentMethodId": "2", "deliveryOptionId": "2"}),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(placed["charges"]["deliveryFee"], 0.0);
    assert_eq!(placed["charges"]["total"], 2.49);
    assert_eq!(placed["address"]["name"], "Work");

    let order_id = placed["order"]["id"].as_str().unwrap().to_string();
    let (status, tracking) = ctx
        .get(&format!("/api/orders/{order_id}/tracking"))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tracking["currentStep"], 1);
    assert_eq!(tracking["estimatedMinutes"], 25);
    assert_eq!(tracking["steps"][0]["status"], "current");

    let (_, cart) = ctx.get("/api/cart").await.unwrap();
    assert!(cart["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_checkout_rejects_unknown_payment_method() {
    let ctx = TestContext::new().await.unwrap();
    ctx.post("/api/cart/items", json!({"productId": "2"}))
        .await
        .unwrap();

    let (status, _) = ctx
        .post(
            "/api/checkout",
            json!({"addressId": "1", "paymentMethodId": "7", "deliveryOptionId": "1"}),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, cart) = ctx.get("/api/cart").await.unwrap();
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);
}
