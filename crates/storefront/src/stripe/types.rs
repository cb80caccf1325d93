//! Wire types for the Stripe REST API.
//!
//! Response types deserialize Stripe's JSON; request parameters serialize to
//! the bracketed form encoding Stripe expects (`line_items[0][price]=…`).

use ignite_core::{CheckoutSessionId, CurrencyCode, PriceId, ProductId};
use serde::Deserialize;

// =============================================================================
// Responses
// =============================================================================

/// A product as returned by `GET /v1/products/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Image URLs in display order; may be empty.
    #[serde(default)]
    pub images: Vec<String>,
    /// Present when the request expanded `default_price`.
    #[serde(default)]
    pub default_price: Option<Price>,
}

impl Product {
    /// First entry of the image list, if any.
    #[must_use]
    pub fn first_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// An expanded price object.
#[derive(Debug, Clone, Deserialize)]
pub struct Price {
    pub id: PriceId,
    /// Amount in minor units. Nullable on Stripe's side (e.g., tiered
    /// pricing); callers treat `None` as zero.
    pub unit_amount: Option<i64>,
    pub currency: CurrencyCode,
}

/// A checkout session as returned by `POST /v1/checkout/sessions`.
///
/// Provider-owned and opaque: only the id and the hosted URL are read.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: CheckoutSessionId,
    /// Hosted checkout URL. Absent once a session expires.
    #[serde(default)]
    pub url: Option<String>,
}

/// Error envelope Stripe wraps around failed requests.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ApiError,
}

/// The error object inside [`ErrorResponse`].
#[derive(Debug, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

// =============================================================================
// Requests
// =============================================================================

/// Checkout session mode. Only one-time payments are sold here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutSessionMode {
    /// One-time payment
    Payment,
}

impl CheckoutSessionMode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Payment => "payment",
        }
    }
}

/// One line item of a checkout session request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutLineItem {
    /// Reference an existing provider price. Quantity is deliberately not
    /// sent; the provider defaults it to 1.
    Price { price: PriceId },
    /// Inline price data for ad-hoc amounts.
    PriceData {
        price_data: PriceData,
        quantity: u32,
    },
}

/// Inline price data for a [`CheckoutLineItem::PriceData`] line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceData {
    pub currency: CurrencyCode,
    /// Unit amount in minor units.
    pub unit_amount: i64,
    pub product_data: ProductData,
}

/// Display data for an inline line item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductData {
    pub name: String,
    pub images: Vec<String>,
}

/// Parameters for `POST /v1/checkout/sessions`.
#[derive(Debug, Clone)]
pub struct CreateCheckoutSession {
    pub mode: CheckoutSessionMode,
    pub payment_method_types: Vec<&'static str>,
    pub line_items: Vec<CheckoutLineItem>,
    pub success_url: String,
    pub cancel_url: String,
}

impl CreateCheckoutSession {
    /// Encode as the bracketed key/value pairs Stripe's form API expects.
    #[must_use]
    pub fn to_form(&self) -> Vec<(String, String)> {
        let mut form = vec![("mode".to_string(), self.mode.as_str().to_string())];

        for (i, method) in self.payment_method_types.iter().enumerate() {
            form.push((format!("payment_method_types[{i}]"), (*method).to_string()));
        }

        for (i, item) in self.line_items.iter().enumerate() {
            match item {
                CheckoutLineItem::Price { price } => {
                    form.push((format!("line_items[{i}][price]"), price.to_string()));
                }
                CheckoutLineItem::PriceData {
                    price_data,
                    quantity,
                } => {
                    form.push((
                        format!("line_items[{i}][price_data][currency]"),
                        price_data.currency.stripe_code().to_string(),
                    ));
                    form.push((
                        format!("line_items[{i}][price_data][unit_amount]"),
                        price_data.unit_amount.to_string(),
                    ));
                    form.push((
                        format!("line_items[{i}][price_data][product_data][name]"),
                        price_data.product_data.name.clone(),
                    ));
                    for (j, image) in price_data.product_data.images.iter().enumerate() {
                        form.push((
                            format!("line_items[{i}][price_data][product_data][images][{j}]"),
                            image.clone(),
                        ));
                    }
                    form.push((format!("line_items[{i}][quantity]"), quantity.to_string()));
                }
            }
        }

        form.push(("success_url".to_string(), self.success_url.clone()));
        form.push(("cancel_url".to_string(), self.cancel_url.clone()));
        form
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn base_params(line_items: Vec<CheckoutLineItem>) -> CreateCheckoutSession {
        CreateCheckoutSession {
            mode: CheckoutSessionMode::Payment,
            payment_method_types: vec!["card"],
            line_items,
            success_url: "http://localhost:3000/success?session_id={CHECKOUT_SESSION_ID}"
                .to_string(),
            cancel_url: "http://localhost:3000/cancel".to_string(),
        }
    }

    fn value_of<'a>(form: &'a [(String, String)], key: &str) -> Option<&'a str> {
        form.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_referenced_price_sends_no_quantity() {
        let params = base_params(vec![CheckoutLineItem::Price {
            price: PriceId::new("price_123"),
        }]);
        let form = params.to_form();

        assert_eq!(value_of(&form, "line_items[0][price]"), Some("price_123"));
        // Quantity defaults to 1 on the provider side; it must not be sent.
        assert!(!form.iter().any(|(k, _)| k.contains("quantity")));
    }

    #[test]
    fn test_inline_price_data_encoding() {
        let params = base_params(vec![CheckoutLineItem::PriceData {
            price_data: PriceData {
                currency: CurrencyCode::new("brl"),
                unit_amount: 5000,
                product_data: ProductData {
                    name: "Shirt".to_string(),
                    images: vec!["img.png".to_string()],
                },
            },
            quantity: 2,
        }]);
        let form = params.to_form();

        assert_eq!(
            value_of(&form, "line_items[0][price_data][currency]"),
            Some("brl")
        );
        assert_eq!(
            value_of(&form, "line_items[0][price_data][unit_amount]"),
            Some("5000")
        );
        assert_eq!(
            value_of(&form, "line_items[0][price_data][product_data][name]"),
            Some("Shirt")
        );
        assert_eq!(
            value_of(&form, "line_items[0][price_data][product_data][images][0]"),
            Some("img.png")
        );
        assert_eq!(value_of(&form, "line_items[0][quantity]"), Some("2"));
    }

    #[test]
    fn test_session_mode_and_redirects_encoded() {
        let params = base_params(vec![]);
        let form = params.to_form();

        assert_eq!(value_of(&form, "mode"), Some("payment"));
        assert_eq!(value_of(&form, "payment_method_types[0]"), Some("card"));
        assert_eq!(
            value_of(&form, "success_url"),
            Some("http://localhost:3000/success?session_id={CHECKOUT_SESSION_ID}")
        );
        assert_eq!(
            value_of(&form, "cancel_url"),
            Some("http://localhost:3000/cancel")
        );
    }

    #[test]
    fn test_product_first_image() {
        let product: Product = serde_json::from_str(
            r#"{"id":"prod_1","name":"Shirt","images":["a.png","b.png"]}"#,
        )
        .unwrap();
        assert_eq!(product.first_image(), Some("a.png"));

        let bare: Product =
            serde_json::from_str(r#"{"id":"prod_2","name":"No images"}"#).unwrap();
        assert_eq!(bare.first_image(), None);
    }

    #[test]
    fn test_price_accepts_any_catalog_currency() {
        // The provider decides which currencies a product is priced in;
        // codes outside the display symbol table must still parse.
        let price: Price = serde_json::from_str(
            r#"{"id":"price_1","unit_amount":120000,"currency":"jpy"}"#,
        )
        .unwrap();
        assert_eq!(price.currency.stripe_code(), "jpy");
    }

    #[test]
    fn test_price_nullable_unit_amount() {
        let price: Price =
            serde_json::from_str(r#"{"id":"price_1","unit_amount":null,"currency":"brl"}"#)
                .unwrap();
        assert_eq!(price.unit_amount, None);
        assert_eq!(price.currency, CurrencyCode::new("brl"));
    }
}
