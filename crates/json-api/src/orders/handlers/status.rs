//! Set Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::status::OrderStatus;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Set Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetOrderStatusRequest {
    /// One of `pending`, `processing`, `shipped`, `delivered` or `cancelled`
    pub status: String,
}

/// Set Order Status Handler
///
/// Administrators move orders one step forward, or cancel them before they ship.
#[endpoint(
    tags("orders"),
    summary = "Set Order Status",
    security(("user_identity" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::FORBIDDEN, description = "Administrator capability required"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Transition not allowed"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Service Unavailable"),
    ),
)]
#[tracing::instrument(
    name = "orders.status.update",
    skip(order, json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty,
        status = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<SetOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity();
    let order = order.into_inner();

    let status = json
        .into_inner()
        .status
        .parse::<OrderStatus>()
        .or_400("Unknown order status")?;

    let span = tracing::Span::current();

    if let Some(identity) = identity {
        span.record("user_uuid", tracing::field::display(identity.user));
    }

    span.record("order_uuid", tracing::field::display(order));
    span.record("status", status.as_str());

    let order = state
        .app
        .orders
        .set_order_status(identity, order.into(), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::orders::{
        MockOrdersService, OrdersServiceError, records::OrderUuid,
    };

    use crate::test_helpers::{admin, admin_orders_service, make_order, orders_service};

    use super::*;

    fn route() -> Router {
        Router::with_path("orders/{order}/status").put(handler)
    }

    #[tokio::test]
    async fn test_admin_advances_order() -> TestResult {
        let uuid = OrderUuid::new();
        let order = make_order(uuid, OrderStatus::Processing);

        let mut orders = MockOrdersService::new();

        orders
            .expect_set_order_status()
            .once()
            .with(eq(admin()), eq(uuid), eq(OrderStatus::Processing))
            .return_once(move |_, _, _| Ok(order));

        let mut res = TestClient::put(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "processing" }))
            .send(&admin_orders_service(orders, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(body.status, "processing");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders.expect_set_order_status().never();

        let res = TestClient::put(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "lost" }))
            .send(&admin_orders_service(orders, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_gets_403() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_set_order_status()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::Forbidden));

        let res = TestClient::put(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "shipped" }))
            .send(&orders_service(orders, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_skipping_a_step_returns_409() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_set_order_status()
            .once()
            .with(eq(admin()), eq(uuid), eq(OrderStatus::Delivered))
            .return_once(|_, _, _| {
                Err(OrdersServiceError::InvalidTransition {
                    from: OrderStatus::Pending,
                    to: OrderStatus::Delivered,
                })
            });

        let res = TestClient::put(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "delivered" }))
            .send(&admin_orders_service(orders, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
