//! Integration tests for the storefront checkout flow.
//!
//! These tests require:
//! - The storefront running (cargo run -p ignite-storefront)
//! - Stripe test-mode credentials in environment
//! - `STOREFRONT_TEST_PRODUCT` / `STOREFRONT_TEST_PRICE` pointing at a
//!   product and price that exist in the Stripe test account
//!
//! Run with: cargo test -p ignite-integration-tests -- --ignored

use reqwest::{Client, StatusCode, redirect};
use serde_json::{Value, json};

/// Base URL for the storefront (configurable via environment).
fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A Stripe test-mode product id to exercise the catalog with.
fn test_product_id() -> String {
    std::env::var("STOREFRONT_TEST_PRODUCT").expect("STOREFRONT_TEST_PRODUCT must be set")
}

/// A Stripe test-mode price id to exercise checkout with.
fn test_price_id() -> String {
    std::env::var("STOREFRONT_TEST_PRICE").expect("STOREFRONT_TEST_PRICE must be set")
}

/// Client that surfaces 303s instead of following them.
fn no_redirect_client() -> Client {
    Client::builder()
        .redirect(redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

// ============================================================================
// Health & Catalog Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_health_check() {
    let base_url = storefront_base_url();
    let resp = reqwest::get(format!("{base_url}/health"))
        .await
        .expect("Failed to reach storefront");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("Failed to read response"), "ok");
}

#[tokio::test]
#[ignore = "Requires running storefront and Stripe test credentials"]
async fn test_product_page_has_display_fields() {
    let base_url = storefront_base_url();
    let product_id = test_product_id();

    let resp = reqwest::get(format!("{base_url}/products/{product_id}"))
        .await
        .expect("Failed to get product");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse product JSON");

    assert_eq!(body["id"], product_id.as_str());
    assert!(body["name"].is_string());
    assert!(body["displayPrice"].is_string());
    assert!(body["defaultPriceId"].is_string());
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_unknown_product_is_404() {
    let base_url = storefront_base_url();
    let resp = reqwest::get(format!("{base_url}/products/prod_does_not_exist"))
        .await
        .expect("Failed to reach storefront");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Checkout API Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_checkout_rejects_get() {
    let base_url = storefront_base_url();
    let resp = reqwest::get(format!("{base_url}/api/checkout"))
        .await
        .expect("Failed to reach storefront");

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        resp.headers().get("allow").expect("missing Allow header"),
        "POST"
    );
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_checkout_rejects_empty_body() {
    let client = Client::new();
    let base_url = storefront_base_url();

    let resp = client
        .post(format!("{base_url}/api/checkout"))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to reach storefront");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running storefront and Stripe test credentials"]
async fn test_checkout_creates_session() {
    let client = Client::new();
    let base_url = storefront_base_url();
    let price_id = test_price_id();

    let resp = client
        .post(format!("{base_url}/api/checkout"))
        .json(&json!({"priceId": price_id}))
        .send()
        .await
        .expect("Failed to reach storefront");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse checkout JSON");
    let session_id = body["sessionId"].as_str().expect("missing sessionId");
    assert!(session_id.starts_with("cs_"));
}

#[tokio::test]
#[ignore = "Requires running storefront and Stripe test credentials"]
async fn test_buy_now_redirects_to_stripe() {
    let client = no_redirect_client();
    let base_url = storefront_base_url();
    let price_id = test_price_id();

    let resp = client
        .post(format!("{base_url}/checkout"))
        .form(&[("price_id", price_id.as_str())])
        .send()
        .await
        .expect("Failed to reach storefront");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp
        .headers()
        .get("location")
        .expect("missing Location header")
        .to_str()
        .expect("non-utf8 Location header");
    assert!(location.starts_with("https://checkout.stripe.com/"));
}
