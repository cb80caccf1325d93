//! Checkout route handlers.
//!
//! Two surfaces share the same session-creation service:
//!
//! - `POST /api/checkout` - the JSON API: takes a price id or cart line
//!   items, answers `{ "sessionId": … }` and leaves navigation to the caller.
//! - `POST /checkout` and `POST /checkout/cart` - the redirect flow: creates
//!   the session and answers 303 See Other to the hosted checkout page. On
//!   failure no redirect is issued; the structured error goes back to the
//!   page and the buy control re-enables.

use axum::{
    Form, Json,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use axum::extract::State;
use ignite_core::{Cart, CheckoutSessionId, PriceId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::services::checkout::{self, CheckoutLines, CheckoutRequest};
use crate::state::AppState;

/// Response body for `POST /api/checkout`.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    #[serde(rename = "sessionId")]
    pub session_id: CheckoutSessionId,
}

/// Buy-now form data.
#[derive(Debug, Deserialize)]
pub struct BuyForm {
    pub price_id: PriceId,
}

/// The origin the provider redirects back to after checkout.
///
/// Taken from the request's `Origin` header, falling back to the configured
/// base URL.
fn request_origin(headers: &HeaderMap, state: &AppState) -> String {
    headers
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .map_or_else(|| state.config().base_url.clone(), str::to_owned)
}

/// Create a checkout session (JSON API).
#[instrument(skip(state, headers, body))]
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>> {
    let lines = body.into_lines()?;
    let origin = request_origin(&headers, &state);

    let session = checkout::create_session(&state, &origin, lines).await?;

    Ok(Json(CheckoutResponse {
        session_id: session.id,
    }))
}

/// Reject non-POST methods on the checkout endpoint.
///
/// Mounted as the method-router fallback so every other verb gets a 405 with
/// an `Allow` header and no body parsing.
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        "Method Not Allowed",
    )
}

/// Buy a single item now: create a session and redirect to it.
#[instrument(skip(state, headers))]
pub async fn buy(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<BuyForm>,
) -> Result<Response> {
    let origin = request_origin(&headers, &state);
    let session =
        checkout::create_session(&state, &origin, CheckoutLines::Price(form.price_id)).await?;

    redirect_to_session(&session)
}

/// Check out the submitted cart: create a session and redirect to it.
#[instrument(skip(state, headers, cart), fields(lines = cart.len()))]
pub async fn cart(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(cart): Json<Cart>,
) -> Result<Response> {
    if cart.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }

    let origin = request_origin(&headers, &state);
    let lines = CheckoutLines::Cart(cart.into_line_items());
    let session = checkout::create_session(&state, &origin, lines).await?;

    redirect_to_session(&session)
}

/// 303 See Other to the hosted checkout page.
fn redirect_to_session(session: &crate::stripe::types::CheckoutSession) -> Result<Response> {
    let url = session.url.as_deref().ok_or_else(|| {
        AppError::Internal(format!("session {} has no checkout URL", session.id))
    })?;
    Ok(Redirect::to(url).into_response())
}
