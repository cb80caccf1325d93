//! Stripe REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use ignite_core::ProductId;
use moka::future::Cache;
use secrecy::ExposeSecret;
use tracing::{debug, instrument};

use crate::config::StripeConfig;

use super::StripeError;
use super::cache::CacheValue;
use super::types::{CheckoutSession, CreateCheckoutSession, ErrorResponse, Product};

/// Product cache TTL - the storefront's page revalidation interval.
const PRODUCT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Client for the Stripe REST API.
///
/// Provides typed access to the product catalog and checkout session
/// creation. Products are cached for one hour; pages built from them may be
/// stale for up to that window.
#[derive(Clone)]
pub struct StripeClient {
    inner: Arc<StripeClientInner>,
}

struct StripeClientInner {
    client: reqwest::Client,
    api_base: String,
    secret_key: String,
    cache: Cache<String, CacheValue>,
}

impl StripeClient {
    /// Create a new Stripe API client.
    #[must_use]
    pub fn new(config: &StripeConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(PRODUCT_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(StripeClientInner {
                client: reqwest::Client::new(),
                api_base: config.api_base.trim_end_matches('/').to_string(),
                secret_key: config.secret_key.expose_secret().to_string(),
                cache,
            }),
        }
    }

    /// Deserialize a Stripe response, mapping error envelopes to
    /// [`StripeError`].
    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, StripeError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Stripe wraps failures in {"error": {...}}
            let (message, code) = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(envelope) => (
                    envelope
                        .error
                        .message
                        .unwrap_or_else(|| "(no error message)".to_string()),
                    envelope.error.code,
                ),
                Err(_) => (body.chars().take(200).collect::<String>(), None),
            };

            tracing::error!(
                status = %status,
                message = %message,
                "Stripe API returned non-success status"
            );

            if code.as_deref() == Some("resource_missing") {
                return Err(StripeError::NotFound(message));
            }
            return Err(StripeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse Stripe response"
            );
            StripeError::Parse(e)
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a product by id, expanding its default price.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, StripeError> {
        let cache_key = format!("product:{id}");

        // Check cache
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let url = format!("{}/v1/products/{}", self.inner.api_base, id);
        let response = self
            .inner
            .client
            .get(&url)
            .bearer_auth(&self.inner.secret_key)
            .query(&[("expand[]", "default_price")])
            .send()
            .await?;

        let product: Product = Self::handle_response(response).await?;

        // Cache the result
        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Warm the product cache at startup.
    ///
    /// Failures are logged, not fatal - the product will be fetched on demand
    /// when first requested.
    pub async fn warm_product(&self, id: &ProductId) {
        match self.get_product(id).await {
            Ok(product) => tracing::info!(product_id = %product.id, "Warmed product cache"),
            Err(e) => tracing::warn!(product_id = %id, error = %e, "Failed to warm product cache"),
        }
    }

    // =========================================================================
    // Checkout Sessions (not cached - mutable provider state)
    // =========================================================================

    /// Create a hosted checkout session.
    ///
    /// Each successful call creates exactly one new session on the provider;
    /// no idempotency key is supplied, so a retried request creates another.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the parameters or the request
    /// fails.
    #[instrument(skip(self, params), fields(line_items = params.line_items.len()))]
    pub async fn create_checkout_session(
        &self,
        params: &CreateCheckoutSession,
    ) -> Result<CheckoutSession, StripeError> {
        let url = format!("{}/v1/checkout/sessions", self.inner.api_base);
        let response = self
            .inner
            .client
            .post(&url)
            .bearer_auth(&self.inner.secret_key)
            .form(&params.to_form())
            .send()
            .await?;

        let session: CheckoutSession = Self::handle_response(response).await?;
        debug!(session_id = %session.id, "Created checkout session");
        Ok(session)
    }
}
