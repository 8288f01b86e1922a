//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, models::CartResponse},
    extensions::*,
    state::State,
};

const fn default_quantity() -> u32 {
    1
}

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    pub product_uuid: Uuid,

    /// Units to add; merged with any existing line for the product
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

/// Add Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Add Item to Cart",
    security(("user_identity" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Quantity out of range"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Service Unavailable"),
    ),
)]
#[tracing::instrument(
    name = "cart.items.create",
    skip(json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity();
    let request = json.into_inner();

    let span = tracing::Span::current();

    if let Some(identity) = identity {
        span.record("user_uuid", tracing::field::display(identity.user));
    }

    span.record("product_uuid", tracing::field::display(request.product_uuid));
    span.record("quantity", request.quantity);

    let cart = state
        .app
        .carts
        .add_item(identity, request.product_uuid.into(), request.quantity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::{
        carts::{CartsServiceError, MockCartsService},
        catalog::records::ProductUuid,
    };

    use crate::test_helpers::{carts_service, customer, make_cart, make_line};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart/items").post(handler))
    }

    #[tokio::test]
    async fn test_add_item_merges_and_returns_cart() -> TestResult {
        let product = ProductUuid::new();
        let cart = make_cart(vec![make_line(product, 5, 1_00)]);

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .with(eq(customer()), eq(product), eq(3))
            .return_once(move |_, _, _| Ok(cart));

        let mut res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_uuid": product.into_uuid(), "quantity": 3 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CartResponse = res.take_json().await?;

        assert_eq!(body.total_items, 5);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_defaults_to_one_unit() -> TestResult {
        let product = ProductUuid::new();
        let cart = make_cart(vec![make_line(product, 1, 1_00)]);

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .with(eq(customer()), eq(product), eq(1))
            .return_once(move |_, _, _| Ok(cart));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_uuid": product.into_uuid() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_zero_quantity_returns_400() -> TestResult {
        let product = ProductUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .with(eq(customer()), eq(product), eq(0))
            .return_once(|_, _, _| Err(CartsServiceError::InvalidQuantity));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_uuid": product.into_uuid(), "quantity": 0 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_negative_quantity_is_rejected_before_the_service() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_add_item().never();

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_uuid": Uuid::now_v7(), "quantity": -2 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_unknown_product_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::ProductNotFound));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_uuid": Uuid::now_v7(), "quantity": 1 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
