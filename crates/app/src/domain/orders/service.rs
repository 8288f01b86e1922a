//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::orders::{
        errors::OrdersServiceError,
        models::Order,
        records::{OrderRecord, OrderUuid},
        repositories::{PgOrderItemsRepository, PgOrdersRepository},
        status::OrderStatus,
    },
    identity::{Identity, require},
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    items: PgOrderItemsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            items: PgOrderItemsRepository::new(),
        }
    }

    async fn with_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        records: Vec<OrderRecord>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let uuids: Vec<OrderUuid> = records.iter().map(|record| record.uuid).collect();

        let mut items = self.items.list_items(tx, &uuids).await?;

        Ok(records
            .into_iter()
            .map(|record| {
                let lines = items.remove(&record.uuid).unwrap_or_default();

                Order::from_parts(record, lines)
            })
            .collect())
    }

    /// Apply a validated transition to a locked order.
    async fn transition(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        current: OrderRecord,
        to: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        if !current.status.can_transition_to(to) {
            return Err(OrdersServiceError::InvalidTransition {
                from: current.status,
                to,
            });
        }

        let updated = self.orders.update_status(tx, current.uuid, to).await?;

        let mut orders = self.with_items(tx, vec![updated]).await?;

        orders.pop().ok_or(OrdersServiceError::NotFound)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.get_order",
        skip(self, identity),
        fields(user_uuid = tracing::field::Empty, order_uuid = %order),
        err
    )]
    async fn get_order(
        &self,
        identity: Option<Identity>,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError> {
        let identity = require(identity)?;

        Span::current().record("user_uuid", tracing::field::display(identity.user));

        let mut tx = self.db.begin_transaction().await?;

        let record = self.orders.get_order(&mut tx, order).await?;

        if !(identity.is_admin || record.user_uuid == identity.user) {
            return Err(OrdersServiceError::NotFound);
        }

        let mut orders = self.with_items(&mut tx, vec![record]).await?;

        tx.commit().await?;

        orders.pop().ok_or(OrdersServiceError::NotFound)
    }

    #[tracing::instrument(
        name = "orders.service.list_orders",
        skip(self, identity),
        fields(user_uuid = tracing::field::Empty),
        err
    )]
    async fn list_orders(&self, identity: Option<Identity>) -> Result<Vec<Order>, OrdersServiceError> {
        let identity = require(identity)?;

        Span::current().record("user_uuid", tracing::field::display(identity.user));

        let mut tx = self.db.begin_transaction().await?;

        let records = self.orders.list_user_orders(&mut tx, identity.user).await?;
        let orders = self.with_items(&mut tx, records).await?;

        tx.commit().await?;

        Ok(orders)
    }

    #[tracing::instrument(
        name = "orders.service.list_all_orders",
        skip(self, identity),
        fields(user_uuid = tracing::field::Empty),
        err
    )]
    async fn list_all_orders(
        &self,
        identity: Option<Identity>,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        let identity = require(identity)?;

        Span::current().record("user_uuid", tracing::field::display(identity.user));

        if !identity.is_admin {
            return Err(OrdersServiceError::Forbidden);
        }

        let mut tx = self.db.begin_transaction().await?;

        let records = self.orders.list_all_orders(&mut tx).await?;
        let orders = self.with_items(&mut tx, records).await?;

        tx.commit().await?;

        Ok(orders)
    }

    #[tracing::instrument(
        name = "orders.service.set_order_status",
        skip(self, identity),
        fields(user_uuid = tracing::field::Empty, order_uuid = %order, status = %status),
        err
    )]
    async fn set_order_status(
        &self,
        identity: Option<Identity>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let identity = require(identity)?;

        Span::current().record("user_uuid", tracing::field::display(identity.user));

        if !identity.is_admin {
            return Err(OrdersServiceError::Forbidden);
        }

        let mut tx = self.db.begin_transaction().await?;

        let current = self.orders.lock_order(&mut tx, order).await?;
        let from = current.status;

        let updated = self.transition(&mut tx, current, status).await?;

        tx.commit().await?;

        info!(%from, to = %updated.status, "order status changed");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "orders.service.cancel_order",
        skip(self, identity),
        fields(user_uuid = tracing::field::Empty, order_uuid = %order),
        err
    )]
    async fn cancel_order(
        &self,
        identity: Option<Identity>,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError> {
        let identity = require(identity)?;

        Span::current().record("user_uuid", tracing::field::display(identity.user));

        let mut tx = self.db.begin_transaction().await?;

        let current = self.orders.lock_order(&mut tx, order).await?;

        if current.user_uuid != identity.user {
            return Err(OrdersServiceError::NotFound);
        }

        let from = current.status;

        let cancelled = self
            .transition(&mut tx, current, OrderStatus::Cancelled)
            .await?;

        tx.commit().await?;

        info!(%from, "order cancelled by owner");

        Ok(cancelled)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Read one order. Only the owner or an administrator can see it.
    async fn get_order(
        &self,
        identity: Option<Identity>,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError>;

    /// The caller's orders, newest first.
    async fn list_orders(&self, identity: Option<Identity>) -> Result<Vec<Order>, OrdersServiceError>;

    /// Every order, newest first. Administrators only.
    async fn list_all_orders(
        &self,
        identity: Option<Identity>,
    ) -> Result<Vec<Order>, OrdersServiceError>;

    /// Move an order along the status state machine. Administrators only.
    async fn set_order_status(
        &self,
        identity: Option<Identity>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;

    /// Cancel one of the caller's own orders while it is pending or processing.
    async fn cancel_order(
        &self,
        identity: Option<Identity>,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        identity::UserUuid,
        test::{TestContext, helpers::place_order},
    };

    use super::*;

    #[tokio::test]
    async fn get_order_returns_lines_for_owner() -> TestResult {
        let ctx = TestContext::new().await;
        let placed = place_order(&ctx, ctx.customer(), 12_00, 2).await?;

        let order = ctx.orders.get_order(ctx.customer(), placed.uuid).await?;

        assert_eq!(order, placed);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.total_items(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn get_order_hides_other_users_orders() -> TestResult {
        let ctx = TestContext::new().await;
        let placed = place_order(&ctx, ctx.customer(), 12_00, 1).await?;

        let stranger = Some(Identity::customer(UserUuid::new()));

        let result = ctx.orders.get_order(stranger, placed.uuid).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        let as_admin = ctx.orders.get_order(ctx.admin(), placed.uuid).await?;

        assert_eq!(as_admin.uuid, placed.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn get_order_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.orders.get_order(ctx.admin(), OrderUuid::new()).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_orders_is_newest_first_and_scoped_to_caller() -> TestResult {
        let ctx = TestContext::new().await;

        let first = place_order(&ctx, ctx.customer(), 1_00, 1).await?;
        let second = place_order(&ctx, ctx.customer(), 2_00, 1).await?;

        place_order(&ctx, Some(Identity::customer(UserUuid::new())), 3_00, 1).await?;

        let orders = ctx.orders.list_orders(ctx.customer()).await?;

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        assert_eq!(uuids, vec![second.uuid, first.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn list_all_orders_requires_admin() -> TestResult {
        let ctx = TestContext::new().await;

        place_order(&ctx, ctx.customer(), 1_00, 1).await?;
        place_order(&ctx, Some(Identity::customer(UserUuid::new())), 1_00, 1).await?;

        let result = ctx.orders.list_all_orders(ctx.customer()).await;

        assert!(
            matches!(result, Err(OrdersServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );

        let all = ctx.orders.list_all_orders(ctx.admin()).await?;

        assert_eq!(all.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn set_order_status_walks_the_forward_path() -> TestResult {
        let ctx = TestContext::new().await;
        let placed = place_order(&ctx, ctx.customer(), 1_00, 1).await?;

        let mut updated_at = placed.updated_at;

        for status in [
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
        ] {
            let order = ctx
                .orders
                .set_order_status(ctx.admin(), placed.uuid, status)
                .await?;

            assert_eq!(order.status, status);
            assert!(order.updated_at > updated_at, "updated_at must move forward");
            assert_eq!(order.total_amount, placed.total_amount);
            assert_eq!(order.items, placed.items);

            updated_at = order.updated_at;
        }

        Ok(())
    }

    #[tokio::test]
    async fn set_order_status_rejects_skipping_states() -> TestResult {
        let ctx = TestContext::new().await;
        let placed = place_order(&ctx, ctx.customer(), 1_00, 1).await?;

        let result = ctx
            .orders
            .set_order_status(ctx.admin(), placed.uuid, OrderStatus::Delivered)
            .await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::InvalidTransition {
                    from: OrderStatus::Pending,
                    to: OrderStatus::Delivered
                })
            ),
            "expected InvalidTransition, got {result:?}"
        );

        let order = ctx.orders.get_order(ctx.customer(), placed.uuid).await?;

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.updated_at, placed.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn set_order_status_requires_admin() -> TestResult {
        let ctx = TestContext::new().await;
        let placed = place_order(&ctx, ctx.customer(), 1_00, 1).await?;

        let result = ctx
            .orders
            .set_order_status(ctx.customer(), placed.uuid, OrderStatus::Processing)
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn cancel_order_by_owner_while_pending() -> TestResult {
        let ctx = TestContext::new().await;
        let placed = place_order(&ctx, ctx.customer(), 1_00, 1).await?;

        let order = ctx.orders.cancel_order(ctx.customer(), placed.uuid).await?;

        assert_eq!(order.status, OrderStatus::Cancelled);

        let again = ctx.orders.cancel_order(ctx.customer(), placed.uuid).await;

        assert!(
            matches!(again, Err(OrdersServiceError::InvalidTransition { .. })),
            "expected InvalidTransition, got {again:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn cancel_shipped_order_is_invalid_and_unchanged() -> TestResult {
        let ctx = TestContext::new().await;
        let placed = place_order(&ctx, ctx.customer(), 1_00, 1).await?;

        ctx.orders
            .set_order_status(ctx.admin(), placed.uuid, OrderStatus::Processing)
            .await?;

        let shipped = ctx
            .orders
            .set_order_status(ctx.admin(), placed.uuid, OrderStatus::Shipped)
            .await?;

        let result = ctx.orders.cancel_order(ctx.customer(), placed.uuid).await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::InvalidTransition {
                    from: OrderStatus::Shipped,
                    to: OrderStatus::Cancelled
                })
            ),
            "expected InvalidTransition, got {result:?}"
        );

        let order = ctx.orders.get_order(ctx.customer(), placed.uuid).await?;

        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.updated_at, shipped.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn cancel_order_by_stranger_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let placed = place_order(&ctx, ctx.customer(), 1_00, 1).await?;

        let result = ctx
            .orders
            .cancel_order(Some(Identity::customer(UserUuid::new())), placed.uuid)
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn cancel_order_without_identity_is_unauthenticated() {
        let ctx = TestContext::new().await;

        let result = ctx.orders.cancel_order(None, OrderUuid::new()).await;

        assert!(
            matches!(result, Err(OrdersServiceError::Unauthenticated)),
            "expected Unauthenticated, got {result:?}"
        );
    }
}
