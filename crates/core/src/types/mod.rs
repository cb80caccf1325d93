//! Core types for Ignite Shop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod price;

pub use cart::{Cart, CartLineItem};
pub use id::*;
pub use price::{CurrencyCode, Price};
