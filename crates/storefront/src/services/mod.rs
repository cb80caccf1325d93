//! Business logic shared by route handlers.

pub mod checkout;
