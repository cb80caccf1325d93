//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products/{id}          - Product page data (cached 1 hour)
//!
//! # Checkout
//! POST /api/checkout           - Create a session, answer { sessionId }
//! POST /checkout               - Buy now (form), 303 to hosted checkout
//! POST /checkout/cart          - Cart checkout (JSON), 303 to hosted checkout
//! ```

pub mod checkout;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/{id}", get(products::show))
}

/// Create the checkout redirect routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout::buy))
        .route("/cart", post(checkout::cart))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Product routes
        .nest("/products", product_routes())
        // Checkout redirect flow
        .nest("/checkout", checkout_routes())
        // Checkout JSON API; anything but POST gets a bare 405 + Allow
        .route(
            "/api/checkout",
            post(checkout::create).fallback(checkout::method_not_allowed),
        )
}
