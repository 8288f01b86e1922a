//! Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::Unauthenticated => {
            StatusError::unauthorized().brief("Authentication required")
        }
        OrdersServiceError::Forbidden => {
            StatusError::forbidden().brief("Administrator capability required")
        }
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        error @ OrdersServiceError::InvalidTransition { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failed: {source}");

            StatusError::service_unavailable()
        }
    }
}
