//! Carts
//!
//! A user's cart is the set of `(user, product) → quantity` lines. Lines are
//! materialized against the live catalog on every read.

pub mod errors;
pub mod models;
pub(crate) mod reader;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::CartsServiceError;
pub use service::*;
