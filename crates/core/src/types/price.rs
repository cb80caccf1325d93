//! Type-safe price representation using decimal arithmetic.
//!
//! Stripe reports amounts in the currency's minor unit (cents for USD,
//! centavos for BRL). `Price` keeps that integer representation and converts
//! to a [`Decimal`] only for display, so no float arithmetic ever touches
//! money.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the smallest currency unit (e.g., cents for USD).
    pub unit_amount: i64,
    /// ISO 4217 currency code.
    pub currency: CurrencyCode,
}

impl Price {
    /// Create a price from a minor-unit amount.
    #[must_use]
    pub fn from_minor_units(unit_amount: i64, currency: CurrencyCode) -> Self {
        Self {
            unit_amount,
            currency,
        }
    }

    /// The amount in the currency's standard unit.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        Decimal::new(self.unit_amount, 2)
    }

    /// Format for display (e.g., "R$50.00", or "JPY 50.00" when no symbol is
    /// known for the currency).
    #[must_use]
    pub fn display(&self) -> String {
        match self.currency.symbol() {
            Some(symbol) => format!("{symbol}{}", self.amount()),
            None => format!("{} {}", self.currency.code(), self.amount()),
        }
    }
}

/// An ISO 4217 currency code, held as the lowercase string Stripe uses on the
/// wire ("brl", "usd").
///
/// The catalog decides which currencies exist, so the code is kept open:
/// any string the provider returns is accepted and carried through unchanged.
/// Display symbols are known for a handful of currencies; the rest fall back
/// to the bare uppercase code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Create a currency code, normalizing to lowercase.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_ascii_lowercase())
    }

    /// The currency symbol used for display, if one is known.
    #[must_use]
    pub fn symbol(&self) -> Option<&'static str> {
        match self.0.as_str() {
            "usd" | "cad" | "aud" => Some("$"),
            "brl" => Some("R$"),
            "eur" => Some("€"),
            "gbp" => Some("£"),
            _ => None,
        }
    }

    /// The uppercase ISO 4217 code.
    #[must_use]
    pub fn code(&self) -> String {
        self.0.to_ascii_uppercase()
    }

    /// The lowercase code Stripe expects in request parameters.
    #[must_use]
    pub fn stripe_code(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self("usd".to_string())
    }
}

impl From<String> for CurrencyCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formats_minor_units() {
        let price = Price::from_minor_units(5000, CurrencyCode::new("brl"));
        assert_eq!(price.display(), "R$50.00");

        let price = Price::from_minor_units(1999, CurrencyCode::new("usd"));
        assert_eq!(price.display(), "$19.99");
    }

    #[test]
    fn test_display_zero_amount() {
        // A null unit amount upstream is treated as zero before it gets here.
        let price = Price::from_minor_units(0, CurrencyCode::new("brl"));
        assert_eq!(price.display(), "R$0.00");
    }

    #[test]
    fn test_display_falls_back_to_bare_code() {
        let price = Price::from_minor_units(5000, CurrencyCode::new("jpy"));
        assert_eq!(price.display(), "JPY 50.00");
    }

    #[test]
    fn test_currency_serde_lowercase() {
        let json = serde_json::to_string(&CurrencyCode::new("brl")).unwrap();
        assert_eq!(json, "\"brl\"");

        let back: CurrencyCode = serde_json::from_str("\"usd\"").unwrap();
        assert_eq!(back, CurrencyCode::new("usd"));
    }

    #[test]
    fn test_any_provider_currency_is_accepted() {
        // The catalog owns the currency set; codes outside the symbol table
        // still deserialize and round-trip unchanged.
        let code: CurrencyCode = serde_json::from_str("\"jpy\"").unwrap();
        assert_eq!(code.stripe_code(), "jpy");
        assert_eq!(code.symbol(), None);

        let code: CurrencyCode = serde_json::from_str("\"mxn\"").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"mxn\"");
    }

    #[test]
    fn test_currency_normalizes_case() {
        assert_eq!(CurrencyCode::new("BRL"), CurrencyCode::new("brl"));
        assert_eq!(CurrencyCode::new("BRL").stripe_code(), "brl");
    }

    #[test]
    fn test_stripe_code() {
        assert_eq!(CurrencyCode::new("brl").stripe_code(), "brl");
        assert_eq!(CurrencyCode::new("gbp").code(), "GBP");
    }
}
