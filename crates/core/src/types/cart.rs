//! Client-side cart contents.
//!
//! The cart is owned by the browser: the server never stores it and only sees
//! it when the visitor submits a checkout. This module holds the shared shape
//! of that data plus the add/remove semantics, so the storefront and the
//! tests agree on exactly what a submitted cart means.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::CurrencyCode;

/// A single cart line as held by the client.
///
/// `unit_amount` is the price in minor units the client captured when the
/// item was added. It is display data only - the storefront re-resolves the
/// canonical price from the catalog before talking to Stripe, so a tampered
/// value never reaches a checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Product id the line refers to.
    pub sku: ProductId,
    /// Display name captured at add time.
    pub name: String,
    /// Display image captured at add time.
    #[serde(default)]
    pub image: Option<String>,
    /// Unit price in minor units, as the client saw it.
    #[serde(rename = "price", alias = "unit_amount")]
    pub unit_amount: i64,
    /// Currency the client saw the price in.
    #[serde(default)]
    pub currency: CurrencyCode,
    /// Number of units of this sku.
    pub quantity: u32,
}

/// Cart contents keyed by sku.
///
/// Serializes as a plain map, matching the shape the client persists in
/// local storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: BTreeMap<ProductId, CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item to the cart.
    ///
    /// A sku already present has its quantity incremented by one; a new sku
    /// is inserted with quantity 1, whatever quantity the item carried.
    pub fn add_item(&mut self, item: CartLineItem) {
        self.lines
            .entry(item.sku.clone())
            .and_modify(|line| line.quantity += 1)
            .or_insert(CartLineItem { quantity: 1, ..item });
    }

    /// Remove a sku from the cart. Removing an absent sku is a no-op.
    pub fn remove_item(&mut self, sku: &ProductId) {
        self.lines.remove(sku);
    }

    /// Quantity of a sku currently in the cart, 0 if absent.
    #[must_use]
    pub fn quantity_of(&self, sku: &ProductId) -> u32 {
        self.lines.get(sku).map_or(0, |line| line.quantity)
    }

    /// Current cart contents.
    pub fn line_items(&self) -> impl Iterator<Item = &CartLineItem> {
        self.lines.values()
    }

    /// Consume the cart, returning its lines.
    #[must_use]
    pub fn into_line_items(self) -> Vec<CartLineItem> {
        self.lines.into_values().collect()
    }

    /// Number of distinct skus in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn shirt() -> CartLineItem {
        CartLineItem {
            sku: ProductId::new("sku1"),
            name: "Shirt".to_string(),
            image: Some("img.png".to_string()),
            unit_amount: 5000,
            currency: CurrencyCode::new("brl"),
            quantity: 1,
        }
    }

    #[test]
    fn test_add_same_sku_twice_increments_quantity() {
        let mut cart = Cart::new();
        cart.add_item(shirt());
        cart.add_item(shirt());

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(&ProductId::new("sku1")), 2);
    }

    #[test]
    fn test_add_new_sku_inserts_with_quantity_one() {
        let mut cart = Cart::new();
        // Quantity on the incoming item is ignored on first insert.
        cart.add_item(CartLineItem {
            quantity: 7,
            ..shirt()
        });

        assert_eq!(cart.quantity_of(&ProductId::new("sku1")), 1);
    }

    #[test]
    fn test_remove_absent_sku_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(shirt());

        cart.remove_item(&ProductId::new("sku-not-there"));
        assert_eq!(cart.len(), 1);

        cart.remove_item(&ProductId::new("sku1"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_serializes_as_map_keyed_by_sku() {
        let mut cart = Cart::new();
        cart.add_item(shirt());

        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json["sku1"]["name"], "Shirt");
        assert_eq!(json["sku1"]["price"], 5000);
        assert_eq!(json["sku1"]["quantity"], 1);
    }

    #[test]
    fn test_line_item_accepts_unit_amount_alias() {
        let line: CartLineItem = serde_json::from_str(
            r#"{"sku":"sku1","name":"Shirt","unit_amount":5000,"quantity":2}"#,
        )
        .unwrap();
        assert_eq!(line.unit_amount, 5000);
        assert_eq!(line.currency, CurrencyCode::new("usd"));
    }
}
