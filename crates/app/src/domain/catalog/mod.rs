//! Catalog
//!
//! Read-only access to product records. Price and stock read here are
//! authoritative at the instant of the read and are never cached.

pub mod records;
pub(crate) mod repository;
