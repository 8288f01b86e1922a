//! Checkout
//!
//! Turns a user's cart into a pending order in one transaction, re-validating
//! live stock and freezing unit prices.

pub mod errors;
pub mod plan;
pub mod pricing;
pub mod service;

pub use errors::CheckoutError;
pub use service::*;
