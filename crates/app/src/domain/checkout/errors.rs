//! Checkout errors.

use sqlx::Error;
use thiserror::Error;

use crate::{
    domain::catalog::records::ProductUuid, errors::ErrorClass, identity::Unauthenticated,
};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("cart is empty")]
    EmptyCart,

    #[error("shipping address is required")]
    InvalidShippingAddress,

    #[error("product {product} is out of stock: requested {requested}, available {available}")]
    OutOfStock {
        product: ProductUuid,
        requested: u32,
        available: u32,
    },

    #[error("product {product} is no longer available")]
    ProductUnavailable { product: ProductUuid },

    #[error("order total is too large")]
    AmountOverflow,

    #[error("checkout could not be completed")]
    Persistence(#[source] Error),
}

impl CheckoutError {
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Unauthenticated => ErrorClass::Authentication,
            Self::EmptyCart | Self::InvalidShippingAddress | Self::AmountOverflow => {
                ErrorClass::Validation
            }
            Self::OutOfStock { .. } | Self::ProductUnavailable { .. } => ErrorClass::Availability,
            Self::Persistence(_) => ErrorClass::Persistence,
        }
    }

    /// The product that blocked checkout, for availability failures.
    #[must_use]
    pub fn product(&self) -> Option<ProductUuid> {
        match self {
            Self::OutOfStock { product, .. } | Self::ProductUnavailable { product } => {
                Some(*product)
            }
            _ => None,
        }
    }
}

impl From<Unauthenticated> for CheckoutError {
    fn from(_: Unauthenticated) -> Self {
        Self::Unauthenticated
    }
}

impl From<Error> for CheckoutError {
    fn from(error: Error) -> Self {
        Self::Persistence(error)
    }
}
