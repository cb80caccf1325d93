//! Stripe REST API client.
//!
//! # Architecture
//!
//! - Plain `reqwest` against the Stripe REST API - requests are form-encoded,
//!   responses are JSON
//! - Stripe is source of truth for the catalog - NO local sync, direct API
//!   calls
//! - In-memory caching via `moka` for product reads (1 hour TTL, the page
//!   revalidation interval); session creation is never cached
//!
//! # Example
//!
//! ```rust,ignore
//! use ignite_storefront::stripe::StripeClient;
//!
//! let client = StripeClient::new(&config.stripe);
//!
//! // Get a product with its default price expanded
//! let product = client.get_product(&"prod_OMKefDaDB4bJ8a".into()).await?;
//!
//! // Create a hosted checkout session
//! let session = client.create_checkout_session(&params).await?;
//! ```

mod cache;
mod client;
pub mod types;

pub use client::StripeClient;

use thiserror::Error;

/// Errors that can occur when interacting with the Stripe API.
#[derive(Debug, Error)]
pub enum StripeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stripe returned an error response.
    #[error("Stripe API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found (`resource_missing`).
    #[error("Not found: {0}")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stripe_error_display() {
        let err = StripeError::NotFound("No such product: prod_123".to_string());
        assert_eq!(err.to_string(), "Not found: No such product: prod_123");

        let err = StripeError::Api {
            status: 401,
            message: "Invalid API Key provided".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Stripe API error (HTTP 401): Invalid API Key provided"
        );
    }
}
