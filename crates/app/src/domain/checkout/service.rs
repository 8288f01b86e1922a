//! Checkout service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{Span, info, warn};

use crate::{
    database::Db,
    domain::{
        carts::reader::CartReader,
        checkout::{errors::CheckoutError, plan::plan_order, pricing::ShippingPolicy},
        orders::{
            data::{NewOrder, NewOrderItem},
            models::Order,
            records::{OrderItemUuid, OrderUuid},
            repositories::{PgOrderItemsRepository, PgOrdersRepository},
        },
    },
    identity::{Identity, UserUuid, require},
};

#[derive(Debug, Clone)]
pub struct PgCheckoutService {
    db: Db,
    policy: ShippingPolicy,
    reader: CartReader,
    orders: PgOrdersRepository,
    items: PgOrderItemsRepository,
}

impl PgCheckoutService {
    #[must_use]
    pub fn new(db: Db, policy: ShippingPolicy) -> Self {
        Self {
            db,
            policy,
            reader: CartReader::new(),
            orders: PgOrdersRepository::new(),
            items: PgOrderItemsRepository::new(),
        }
    }

    /// One all-or-nothing attempt: read and plan the cart, write the order and
    /// its lines, empty the cart.
    async fn place_order(
        &self,
        user: UserUuid,
        shipping_address: &str,
    ) -> Result<Order, CheckoutError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let cart = self.reader.read_cart(&mut tx, user).await?;

        let plan = plan_order(&cart, &self.policy)?;

        let new_order = NewOrder {
            uuid: OrderUuid::new(),
            user_uuid: user,
            subtotal: plan.quote.subtotal,
            shipping_fee: plan.quote.shipping_fee,
            total_amount: plan.quote.total,
            shipping_address: shipping_address.to_string(),
        };

        let new_items: Vec<NewOrderItem> = plan
            .lines
            .iter()
            .map(|line| NewOrderItem {
                uuid: OrderItemUuid::new(),
                product_uuid: line.product_uuid,
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
            .collect();

        let record = self.orders.create_order(&mut tx, &new_order).await?;

        let items = self
            .items
            .create_items(&mut tx, record.uuid, &new_items)
            .await?;

        self.reader.items().delete_all(&mut tx, user).await?;

        tx.commit().await?;

        Ok(Order::from_parts(record, items))
    }
}

#[async_trait]
impl CheckoutService for PgCheckoutService {
    #[tracing::instrument(
        name = "checkout.service.checkout",
        skip(self, identity, shipping_address),
        fields(user_uuid = tracing::field::Empty, order_uuid = tracing::field::Empty),
        err
    )]
    async fn checkout(
        &self,
        identity: Option<Identity>,
        shipping_address: String,
    ) -> Result<Order, CheckoutError> {
        let identity = require(identity)?;

        let span = Span::current();

        span.record("user_uuid", tracing::field::display(identity.user));

        let shipping_address = shipping_address.trim();

        if shipping_address.is_empty() {
            return Err(CheckoutError::InvalidShippingAddress);
        }

        let order = match self.place_order(identity.user, shipping_address).await {
            Err(error) if error.class().is_retryable() => {
                warn!(error = %error, "checkout failed in storage, retrying once");

                self.place_order(identity.user, shipping_address).await?
            }
            result => result?,
        };

        span.record("order_uuid", tracing::field::display(order.uuid));

        info!(
            total_amount = order.total_amount,
            lines = order.items.len(),
            "checkout completed"
        );

        Ok(order)
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Convert the caller's cart into a pending order and empty the cart.
    ///
    /// Either the order, all of its lines and the emptied cart become visible
    /// together, or nothing changes.
    async fn checkout(
        &self,
        identity: Option<Identity>,
        shipping_address: String,
    ) -> Result<Order, CheckoutError>;
}
