//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Get Order Handler
///
/// Orders belonging to other users are reported as not found.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("user_identity" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Service Unavailable"),
    ),
)]
#[tracing::instrument(
    name = "orders.get",
    skip(order, depot),
    fields(
        user_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity();
    let order = order.into_inner();

    let span = tracing::Span::current();

    if let Some(identity) = identity {
        span.record("user_uuid", tracing::field::display(identity.user));
    }

    span.record("order_uuid", tracing::field::display(order));

    let order = state
        .app
        .orders
        .get_order(identity, order.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
