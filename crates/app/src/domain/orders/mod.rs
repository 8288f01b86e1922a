//! Orders
//!
//! Orders are immutable snapshots of a checked-out cart. Only the fulfillment
//! status moves, and only along the [`status::OrderStatus`] state machine.

pub mod data;
pub mod errors;
pub mod models;
pub mod records;
pub(crate) mod repositories;
pub mod service;
pub mod status;

pub use errors::OrdersServiceError;
pub use service::*;
