//! Order Models

use jiff::Timestamp;

use crate::{
    domain::orders::{
        records::{OrderItemRecord, OrderRecord, OrderUuid},
        status::OrderStatus,
    },
    identity::UserUuid,
};

/// An order together with its immutable lines, in cart order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub subtotal: u64,
    pub shipping_fee: u64,
    pub total_amount: u64,
    pub status: OrderStatus,
    pub shipping_address: String,
    pub items: Vec<OrderItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Order {
    #[must_use]
    pub fn from_parts(record: OrderRecord, items: Vec<OrderItemRecord>) -> Self {
        Self {
            uuid: record.uuid,
            user_uuid: record.user_uuid,
            subtotal: record.subtotal,
            shipping_fee: record.shipping_fee,
            total_amount: record.total_amount,
            status: record.status,
            shipping_address: record.shipping_address,
            items,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    /// Sum of quantities over every line.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}
