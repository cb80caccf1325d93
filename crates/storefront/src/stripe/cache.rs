//! Cache value types for the Stripe client.

use super::types::Product;

/// Values stored in the client's response cache.
///
/// Only catalog reads are cached; checkout sessions are mutable provider
/// state and are always created fresh.
#[derive(Clone)]
pub enum CacheValue {
    Product(Box<Product>),
}
