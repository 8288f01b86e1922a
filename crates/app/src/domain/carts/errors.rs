//! Carts service errors.

use sqlx::{Error, error::ErrorKind};
use thiserror::Error;

use crate::{errors::ErrorClass, identity::Unauthenticated};

/// `numeric_value_out_of_range`, raised when an increment overflows `INTEGER`.
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("quantity out of range")]
    InvalidQuantity,

    #[error("product not found")]
    ProductNotFound,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl CartsServiceError {
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Unauthenticated => ErrorClass::Authentication,
            Self::InvalidQuantity => ErrorClass::Validation,
            Self::ProductNotFound => ErrorClass::NotFound,
            Self::Sql(_) => ErrorClass::Persistence,
        }
    }
}

impl From<Unauthenticated> for CartsServiceError {
    fn from(_: Unauthenticated) -> Self {
        Self::Unauthenticated
    }
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        let Some(database_error) = error.as_database_error() else {
            return Self::Sql(error);
        };

        if database_error.code().as_deref() == Some(NUMERIC_VALUE_OUT_OF_RANGE) {
            return Self::InvalidQuantity;
        }

        if matches!(database_error.kind(), ErrorKind::CheckViolation) {
            return Self::InvalidQuantity;
        }

        Self::Sql(error)
    }
}
