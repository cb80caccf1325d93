//! Integration tests for Ignite Shop.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the storefront with test-mode Stripe keys
//! cargo run -p ignite-storefront
//!
//! # Run the live tests against it
//! cargo test -p ignite-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `storefront_checkout` - Checkout API and redirect flow against a
//!   running storefront
//!
//! Tests are `#[ignore]`d by default because they need a running server and
//! Stripe test-mode credentials; the in-process suite with a mocked provider
//! lives in the storefront crate itself.
