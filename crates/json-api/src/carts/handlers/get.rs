//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{errors::into_status_error, models::CartResponse},
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Returns the caller's cart, priced against the live catalog.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("user_identity" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Service Unavailable"),
    ),
)]
#[tracing::instrument(
    name = "cart.get",
    skip(depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity();

    if let Some(identity) = identity {
        tracing::Span::current().record("user_uuid", tracing::field::display(identity.user));
    }

    let cart = state
        .app
        .carts
        .get_cart(identity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
