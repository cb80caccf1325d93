//! Ignite Shop Core - Shared types library.
//!
//! This crate provides common types used across all Ignite Shop components:
//! - `storefront` - Public-facing storefront binary
//! - `integration-tests` - End-to-end tests against a running storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Stripe is
//! the source of truth for catalog data; nothing here persists anything.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
