//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, models::CartResponse},
    extensions::*,
    state::State,
};

/// Remove Cart Item Handler
///
/// Removing a product that is not in the cart succeeds.
#[endpoint(
    tags("cart"),
    summary = "Remove Item from Cart",
    security(("user_identity" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item removed"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Service Unavailable"),
    ),
)]
#[tracing::instrument(
    name = "cart.items.delete",
    skip(product, depot),
    fields(
        user_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity();
    let product = product.into_inner();

    let span = tracing::Span::current();

    if let Some(identity) = identity {
        span.record("user_uuid", tracing::field::display(identity.user));
    }

    span.record("product_uuid", tracing::field::display(product));

    let cart = state
        .app
        .carts
        .remove_item(identity, product.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
