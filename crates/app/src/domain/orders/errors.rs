//! Orders service errors.

use sqlx::Error;
use thiserror::Error;

use crate::{domain::orders::status::OrderStatus, errors::ErrorClass, identity::Unauthenticated};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("administrator capability required")]
    Forbidden,

    #[error("order not found")]
    NotFound,

    #[error("cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("storage error")]
    Sql(#[source] Error),
}

impl OrdersServiceError {
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Unauthenticated => ErrorClass::Authentication,
            Self::Forbidden => ErrorClass::Authorization,
            Self::NotFound => ErrorClass::NotFound,
            Self::InvalidTransition { .. } => ErrorClass::Validation,
            Self::Sql(_) => ErrorClass::Persistence,
        }
    }
}

impl From<Unauthenticated> for OrdersServiceError {
    fn from(_: Unauthenticated) -> Self {
        Self::Unauthenticated
    }
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::NotFound,
            error => Self::Sql(error),
        }
    }
}
