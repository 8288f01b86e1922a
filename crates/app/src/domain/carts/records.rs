//! Cart Records

use jiff::Timestamp;

use crate::{domain::catalog::records::ProductUuid, identity::UserUuid};

/// Cart Item Record
///
/// Keyed by `(user_uuid, product_uuid)`; `quantity` is always at least one.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemRecord {
    pub user_uuid: UserUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
