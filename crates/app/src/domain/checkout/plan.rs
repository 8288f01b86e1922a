//! Checkout planning over a materialized cart.

use crate::domain::{
    carts::models::{Cart, CartLine},
    catalog::records::ProductUuid,
    checkout::{
        errors::CheckoutError,
        pricing::{Quote, ShippingPolicy},
    },
};

/// One order line with its unit price frozen at planning time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedLine {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub unit_price: u64,
}

/// Validated lines and totals, ready to be written as an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPlan {
    pub lines: Vec<PlannedLine>,
    pub quote: Quote,
}

fn plan_line(line: &CartLine) -> Result<(PlannedLine, u64), CheckoutError> {
    let product = match &line.product {
        Some(product) if line.available => product,
        _ => {
            return Err(CheckoutError::ProductUnavailable {
                product: line.product_uuid,
            });
        }
    };

    if line.quantity > product.stock_quantity {
        return Err(CheckoutError::OutOfStock {
            product: line.product_uuid,
            requested: line.quantity,
            available: product.stock_quantity,
        });
    }

    let line_total = product
        .unit_price
        .checked_mul(u64::from(line.quantity))
        .ok_or(CheckoutError::AmountOverflow)?;

    let planned = PlannedLine {
        product_uuid: line.product_uuid,
        quantity: line.quantity,
        unit_price: product.unit_price,
    };

    Ok((planned, line_total))
}

/// Validate every line against its live product and price the order.
///
/// Lines are checked in cart order and the first failing line is reported.
///
/// # Errors
///
/// - [`CheckoutError::EmptyCart`] when there are no lines.
/// - [`CheckoutError::ProductUnavailable`] for a deleted or inactive product.
/// - [`CheckoutError::OutOfStock`] when a quantity exceeds live stock.
/// - [`CheckoutError::AmountOverflow`] when the totals cannot be stored.
pub fn plan_order(cart: &Cart, policy: &ShippingPolicy) -> Result<OrderPlan, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let mut lines = Vec::with_capacity(cart.lines.len());
    let mut subtotal: u64 = 0;

    for line in &cart.lines {
        let (planned, line_total) = plan_line(line)?;

        subtotal = subtotal
            .checked_add(line_total)
            .ok_or(CheckoutError::AmountOverflow)?;

        lines.push(planned);
    }

    let quote = policy.quote(subtotal).ok_or(CheckoutError::AmountOverflow)?;

    Ok(OrderPlan { lines, quote })
}
