//! Set Cart Item Quantity Handler

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

use crate::{
    carts::{errors::into_status_error, models::CartResponse},
    extensions::*,
    state::State,
};

/// Set Cart Item Quantity Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetCartItemQuantityRequest {
    /// New quantity; zero or less removes the line
    pub quantity: i64,
}

/// Set Cart Item Quantity Handler
#[endpoint(
    tags("cart"),
    summary = "Set Cart Item Quantity",
    security(("user_identity" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Quantity set"),
        (status_code = StatusCode::BAD_REQUEST, description = "Quantity out of range"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Service Unavailable"),
    ),
)]
#[tracing::instrument(
    name = "cart.items.update",
    skip(product, json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<SetCartItemQuantityRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity();
    let product = product.into_inner();
    let quantity = json.into_inner().quantity;

    let span = tracing::Span::current();

    if let Some(identity) = identity {
        span.record("user_uuid", tracing::field::display(identity.user));
    }

    span.record("product_uuid", tracing::field::display(product));
    span.record("quantity", quantity);

    let cart = state
        .app
        .carts
        .set_quantity(identity, product.into(), quantity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
