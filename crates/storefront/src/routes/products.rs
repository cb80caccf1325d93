//! Product route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use ignite_core::{Price, PriceId, ProductId};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::stripe::StripeError;
use crate::stripe::types::Product as StripeProduct;

/// Product page data.
///
/// Field names match what the page script expects (`imageUrl`,
/// `displayPrice`, `defaultPriceId`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    /// First entry of the catalog image list, if any.
    pub image_url: Option<String>,
    /// Formatted currency string (e.g., "R$50.00").
    pub display_price: String,
    pub description: String,
    /// The price a buy-now checkout references.
    pub default_price_id: PriceId,
}

impl TryFrom<StripeProduct> for ProductView {
    type Error = AppError;

    fn try_from(product: StripeProduct) -> Result<Self> {
        let price = product.default_price.ok_or_else(|| {
            AppError::Internal(format!("product {} has no default price", product.id))
        })?;

        // A null unit amount is displayed as zero.
        let display_price =
            Price::from_minor_units(price.unit_amount.unwrap_or(0), price.currency).display();

        Ok(Self {
            id: product.id,
            name: product.name,
            image_url: product.images.into_iter().next(),
            display_price,
            description: product.description.unwrap_or_default(),
            default_price_id: price.id,
        })
    }
}

/// Serve product page data.
///
/// Reads go through the client's one-hour cache, so data may be up to an
/// hour stale - the page revalidation interval.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductView>> {
    let product = state.stripe().get_product(&id).await.map_err(|e| match e {
        StripeError::NotFound(message) => AppError::NotFound(message),
        other => AppError::Stripe(other),
    })?;

    Ok(Json(ProductView::try_from(product)?))
}
