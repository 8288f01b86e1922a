//! Cart Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::models::{Cart, CartLine};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The lines in the cart, oldest first
    pub lines: Vec<CartLineResponse>,

    /// Sum of quantities over every line
    pub total_items: u64,

    /// Sum of line totals over available lines, at current prices.
    /// Absent when the amount overflows
    pub subtotal: Option<u64>,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            total_items: cart.total_items(),
            subtotal: cart.subtotal(),
            lines: cart.lines.into_iter().map(CartLineResponse::from).collect(),
        }
    }
}

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    pub product_uuid: Uuid,
    pub quantity: u32,

    /// Product name, absent when the product no longer exists
    pub name: Option<String>,

    /// Current unit price in minor units
    pub unit_price: Option<u64>,

    pub image_url: Option<String>,
    pub stock_quantity: Option<u32>,
    pub line_total: Option<u64>,

    /// Whether the line can currently be purchased
    pub available: bool,

    /// Whether one more unit fits within the current stock level
    pub can_increment: bool,

    /// The date and time the product was first added
    pub added_at: String,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        let can_increment = line.can_increment();
        let line_total = line.line_total();
        let stock_quantity = line.stock_quantity();

        let (name, unit_price, image_url) = match line.product {
            Some(product) => (
                Some(product.name),
                Some(product.unit_price),
                product.image_url,
            ),
            None => (None, None, None),
        };

        Self {
            product_uuid: line.product_uuid.into_uuid(),
            quantity: line.quantity,
            name,
            unit_price,
            image_url,
            stock_quantity,
            line_total,
            available: line.available,
            can_increment,
            added_at: line.added_at.to_string(),
        }
    }
}
