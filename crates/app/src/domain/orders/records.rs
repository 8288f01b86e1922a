//! Order Records

use jiff::Timestamp;

use crate::{
    domain::{catalog::records::ProductUuid, orders::status::OrderStatus},
    identity::UserUuid,
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order Record
///
/// Amounts are frozen at checkout; only `status` and `updated_at` change
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub subtotal: u64,
    pub shipping_fee: u64,
    pub total_amount: u64,
    pub status: OrderStatus,
    pub shipping_address: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Item Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub unit_price: u64,

    /// Index of the line in the cart at checkout.
    pub position: u32,

    pub created_at: Timestamp,
}

impl OrderItemRecord {
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}
