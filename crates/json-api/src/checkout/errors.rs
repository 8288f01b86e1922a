//! Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::{domain::checkout::CheckoutError, errors::ErrorClass};

use crate::observability::CheckoutOutcome;

pub(crate) fn outcome(error: &CheckoutError) -> CheckoutOutcome {
    match error.class() {
        ErrorClass::Availability => CheckoutOutcome::Unavailable,
        ErrorClass::Persistence => CheckoutOutcome::Failed,
        ErrorClass::Authentication
        | ErrorClass::Authorization
        | ErrorClass::Validation
        | ErrorClass::NotFound => CheckoutOutcome::Rejected,
    }
}

pub(crate) fn into_status_error(error: CheckoutError) -> StatusError {
    match error {
        CheckoutError::Unauthenticated => {
            StatusError::unauthorized().brief("Authentication required")
        }
        CheckoutError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        CheckoutError::InvalidShippingAddress => {
            StatusError::bad_request().brief("Shipping address is required")
        }
        CheckoutError::AmountOverflow => StatusError::bad_request().brief("Order total is too large"),
        error @ (CheckoutError::OutOfStock { .. } | CheckoutError::ProductUnavailable { .. }) => {
            StatusError::conflict().brief(error.to_string())
        }
        CheckoutError::Persistence(source) => {
            error!("checkout failed: {source}");

            StatusError::service_unavailable().brief("Checkout could not be completed")
        }
    }
}
