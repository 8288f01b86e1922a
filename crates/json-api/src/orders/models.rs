//! Order Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::{models::Order, records::OrderItemRecord};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// The owner of the order
    pub user_uuid: Uuid,

    /// One of `pending`, `processing`, `shipped`, `delivered` or `cancelled`
    pub status: String,

    /// Sum of line totals at the prices frozen at checkout
    pub subtotal: u64,

    pub shipping_fee: u64,

    /// Amount charged, `subtotal + shipping_fee`
    pub total_amount: u64,

    pub total_items: u64,

    pub shipping_address: String,

    /// The order lines, in the order they were in the cart
    pub items: Vec<OrderItemResponse>,

    /// The date and time the order was placed
    pub created_at: String,

    /// The date and time of the last status change
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            user_uuid: order.user_uuid.into_uuid(),
            status: order.status.to_string(),
            subtotal: order.subtotal,
            shipping_fee: order.shipping_fee,
            total_amount: order.total_amount,
            total_items: order.total_items(),
            shipping_address: order.shipping_address,
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub quantity: u32,

    /// Unit price frozen at checkout
    pub unit_price: u64,

    pub line_total: u64,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            product_uuid: item.product_uuid.into_uuid(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            line_total: item.line_total(),
        }
    }
}

#[cfg(test)]
mod tests {
    use storefront_app::domain::orders::{records::OrderUuid, status::OrderStatus};

    use crate::test_helpers::make_order;

    use super::*;

    #[test]
    fn response_uses_lowercase_status_and_frozen_prices() {
        let uuid = OrderUuid::new();

        let response = OrderResponse::from(make_order(uuid, OrderStatus::Processing));

        assert_eq!(response.uuid, uuid.into_uuid());
        assert_eq!(response.status, "processing");
        assert_eq!(response.total_items, 2);
        assert_eq!(
            response.items.first().map(|item| item.line_total),
            Some(20_00)
        );
    }
}
