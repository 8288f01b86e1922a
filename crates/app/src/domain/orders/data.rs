//! Order Data

use crate::{
    domain::{
        catalog::records::ProductUuid,
        orders::records::{OrderItemUuid, OrderUuid},
    },
    identity::UserUuid,
};

/// New Order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub subtotal: u64,
    pub shipping_fee: u64,
    pub total_amount: u64,
    pub shipping_address: String,
}

/// New Order Item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderItem {
    pub uuid: OrderItemUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub unit_price: u64,
}
