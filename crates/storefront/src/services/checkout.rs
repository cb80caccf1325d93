//! Checkout session creation.
//!
//! Turns a checkout submission - a single price id or a cart - into the line
//! items Stripe expects and creates the hosted session.
//!
//! Cart submissions carry the unit prices the browser saw, but those are
//! never forwarded: every cart line is re-resolved against the catalog and
//! the canonical unit amount and currency are used instead. The client's
//! numbers are display data only.

use ignite_core::{CartLineItem, PriceId};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;
use crate::stripe::StripeError;
use crate::stripe::types::{
    CheckoutLineItem, CheckoutSession, CheckoutSessionMode, CreateCheckoutSession, PriceData,
    Product, ProductData,
};

/// Raw checkout request body.
///
/// The wire format keeps the original mixed naming (`priceId`, `line_items`);
/// validation into [`CheckoutLines`] happens explicitly at the boundary.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    #[serde(rename = "priceId", alias = "price_id", default)]
    pub price_id: Option<PriceId>,
    #[serde(default)]
    pub line_items: Option<Vec<CartLineItem>>,
}

/// A validated checkout submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutLines {
    /// Single-purchase mode: one referenced provider price, quantity 1.
    Price(PriceId),
    /// Cart-checkout mode: the submitted cart lines.
    Cart(Vec<CartLineItem>),
}

impl CheckoutRequest {
    /// Validate the loose body into a tagged variant.
    ///
    /// `priceId` wins when both fields are present; the request degrades to
    /// the single-purchase flow. An empty payload is rejected instead of
    /// being forwarded to the provider.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` when neither field is present or the cart is
    /// empty.
    pub fn into_lines(self) -> Result<CheckoutLines, AppError> {
        if let Some(price_id) = self.price_id {
            return Ok(CheckoutLines::Price(price_id));
        }
        match self.line_items {
            Some(items) if !items.is_empty() => Ok(CheckoutLines::Cart(items)),
            Some(_) => Err(AppError::BadRequest("line_items is empty".to_string())),
            None => Err(AppError::BadRequest(
                "expected priceId or line_items".to_string(),
            )),
        }
    }
}

/// Build the inline line item for one cart line from its catalog product.
///
/// Name, images, unit amount, and currency all come from the catalog; only
/// the quantity is taken from the cart. A null catalog unit amount is treated
/// as zero.
fn line_item_from_catalog(product: &Product, quantity: u32) -> Result<CheckoutLineItem, AppError> {
    let price = product.default_price.as_ref().ok_or_else(|| {
        AppError::Internal(format!("product {} has no default price", product.id))
    })?;

    Ok(CheckoutLineItem::PriceData {
        price_data: PriceData {
            currency: price.currency.clone(),
            unit_amount: price.unit_amount.unwrap_or(0),
            product_data: ProductData {
                name: product.name.clone(),
                images: product.first_image().map(String::from).into_iter().collect(),
            },
        },
        quantity,
    })
}

/// Resolve a validated submission into provider line items.
///
/// Cart mode performs one catalog read per sku; an unknown sku fails the
/// whole request.
async fn build_line_items(
    state: &AppState,
    lines: CheckoutLines,
) -> Result<Vec<CheckoutLineItem>, AppError> {
    match lines {
        CheckoutLines::Price(price) => Ok(vec![CheckoutLineItem::Price { price }]),
        CheckoutLines::Cart(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                let product = state
                    .stripe()
                    .get_product(&item.sku)
                    .await
                    .map_err(map_stripe_error)?;
                out.push(line_item_from_catalog(&product, item.quantity)?);
            }
            Ok(out)
        }
    }
}

/// Create one hosted checkout session for a validated submission.
///
/// `origin` is where the provider redirects the visitor afterwards; the
/// `{CHECKOUT_SESSION_ID}` placeholder is substituted by the provider.
///
/// # Errors
///
/// Returns `NotFound` for unknown cart skus and a structured upstream error
/// for any provider failure.
pub async fn create_session(
    state: &AppState,
    origin: &str,
    lines: CheckoutLines,
) -> Result<CheckoutSession, AppError> {
    let origin = origin.trim_end_matches('/');
    let params = CreateCheckoutSession {
        mode: CheckoutSessionMode::Payment,
        payment_method_types: vec!["card"],
        line_items: build_line_items(state, lines).await?,
        success_url: format!("{origin}/success?session_id={{CHECKOUT_SESSION_ID}}"),
        cancel_url: format!("{origin}/cancel"),
    };

    state
        .stripe()
        .create_checkout_session(&params)
        .await
        .map_err(map_stripe_error)
}

/// Map client errors: a missing resource is the caller's problem (404), the
/// rest is an upstream failure (502).
fn map_stripe_error(err: StripeError) -> AppError {
    match err {
        StripeError::NotFound(message) => AppError::NotFound(message),
        other => AppError::Stripe(other),
    }
}
