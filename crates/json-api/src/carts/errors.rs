//! Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::Unauthenticated => {
            StatusError::unauthorized().brief("Authentication required")
        }
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity out of range")
        }
        CartsServiceError::ProductNotFound => StatusError::not_found().brief("Product not found"),
        CartsServiceError::Sql(source) => {
            error!("cart storage failed: {source}");

            StatusError::service_unavailable()
        }
    }
}
