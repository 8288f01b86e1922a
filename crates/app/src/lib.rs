//! Storefront cart, checkout and order domain with its `PostgreSQL` persistence.

pub mod context;
pub mod database;
pub mod domain;
pub mod errors;
pub mod identity;

#[cfg(test)]
mod test;

mod uuids;
