//! Checkout Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    checkout::errors::{into_status_error, outcome},
    extensions::*,
    observability::{CheckoutOutcome, observe_checkout},
    orders::models::OrderResponse,
    state::State,
};

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequest {
    pub shipping_address: String,
}

/// Checkout Handler
///
/// Turns the caller's cart into a pending order at current prices and empties
/// the cart. On failure the cart is left as it was.
#[endpoint(
    tags("checkout"),
    summary = "Checkout",
    security(("user_identity" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or missing shipping address"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::CONFLICT, description = "A product is out of stock or unavailable"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Checkout could not be completed"),
    ),
)]
#[tracing::instrument(
    name = "checkout.create",
    skip(json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity();

    let span = tracing::Span::current();

    if let Some(identity) = identity {
        span.record("user_uuid", tracing::field::display(identity.user));
    }

    let order = match state
        .app
        .checkout
        .checkout(identity, json.into_inner().shipping_address)
        .await
    {
        Ok(order) => order,
        Err(error) => {
            observe_checkout(outcome(&error));

            return Err(into_status_error(error));
        }
    };

    observe_checkout(CheckoutOutcome::Completed);

    let uuid = order.uuid;

    span.record("order_uuid", tracing::field::display(uuid));

    res.add_header(LOCATION, format!("/orders/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::{
        database::SqlError,
        domain::{
            catalog::records::ProductUuid,
            checkout::{CheckoutError, MockCheckoutService},
            orders::{records::OrderUuid, status::OrderStatus},
        },
    };

    use crate::test_helpers::{checkout_service, customer, make_order};

    use super::*;

    fn make_service(checkout: MockCheckoutService) -> Service {
        checkout_service(checkout, Router::with_path("checkout").post(handler))
    }

    #[tokio::test]
    async fn test_checkout_success_returns_201_with_location() -> TestResult {
        let uuid = OrderUuid::new();
        let order = make_order(uuid, OrderStatus::Pending);

        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_checkout()
            .once()
            .with(eq(customer()), eq("1 Main St".to_string()))
            .return_once(move |_, _| Ok(order));

        let mut res = TestClient::post("http://example.com/checkout")
            .json(&json!({ "shipping_address": "1 Main St" }))
            .send(&make_service(checkout))
            .await;

        let location = res
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/orders/{uuid}")));

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.status, "pending");
        assert_eq!(body.total_amount, 29_99);

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_returns_400() -> TestResult {
        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_checkout()
            .once()
            .return_once(|_, _| Err(CheckoutError::EmptyCart));

        let res = TestClient::post("http://example.com/checkout")
            .json(&json!({ "shipping_address": "1 Main St" }))
            .send(&make_service(checkout))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_out_of_stock_returns_409() -> TestResult {
        let product = ProductUuid::new();

        let mut checkout = MockCheckoutService::new();

        checkout.expect_checkout().once().return_once(move |_, _| {
            Err(CheckoutError::OutOfStock {
                product,
                requested: 5,
                available: 2,
            })
        });

        let mut res = TestClient::post("http://example.com/checkout")
            .add_header("accept", "application/json", true)
            .json(&json!({ "shipping_address": "1 Main St" }))
            .send(&make_service(checkout))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        let body = res.take_string().await?;

        assert!(
            body.contains(&product.to_string()),
            "response should name the product: {body}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_persistence_failure_returns_503() -> TestResult {
        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_checkout()
            .once()
            .return_once(|_, _| Err(CheckoutError::Persistence(SqlError::PoolTimedOut)));

        let res = TestClient::post("http://example.com/checkout")
            .json(&json!({ "shipping_address": "1 Main St" }))
            .send(&make_service(checkout))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_missing_address_field_returns_400() -> TestResult {
        let mut checkout = MockCheckoutService::new();

        checkout.expect_checkout().never();

        let res = TestClient::post("http://example.com/checkout")
            .json(&json!({}))
            .send(&make_service(checkout))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
