//! Cart Models

use jiff::Timestamp;
use rustc_hash::FxHashMap;

use crate::{
    domain::{
        carts::records::CartItemRecord,
        catalog::records::{ProductRecord, ProductUuid},
    },
    identity::UserUuid,
};

/// Live catalog fields denormalized onto a cart line at read time.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSnapshot {
    pub name: String,
    pub unit_price: u64,
    pub image_url: Option<String>,
    pub stock_quantity: u32,
}

impl From<&ProductRecord> for ProductSnapshot {
    fn from(product: &ProductRecord) -> Self {
        Self {
            name: product.name.clone(),
            unit_price: product.price,
            image_url: product.image_url.clone(),
            stock_quantity: product.stock_quantity,
        }
    }
}

/// CartLine Model
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_uuid: ProductUuid,
    pub quantity: u32,

    /// `None` when the product no longer exists in the catalog.
    pub product: Option<ProductSnapshot>,

    /// False when the product was deactivated or deleted after being added.
    pub available: bool,

    pub added_at: Timestamp,
}

impl CartLine {
    /// Live unit price, when the product still exists.
    #[must_use]
    pub fn unit_price(&self) -> Option<u64> {
        self.product.as_ref().map(|product| product.unit_price)
    }

    /// Live stock level, when the product still exists.
    #[must_use]
    pub fn stock_quantity(&self) -> Option<u32> {
        self.product.as_ref().map(|product| product.stock_quantity)
    }

    /// Quantity times the live unit price.
    ///
    /// `None` when the product no longer exists or the amount overflows.
    #[must_use]
    pub fn line_total(&self) -> Option<u64> {
        self.unit_price()
            .and_then(|price| price.checked_mul(u64::from(self.quantity)))
    }

    /// Whether another unit fits within the current stock level.
    ///
    /// Advisory only; stock is enforced at checkout.
    #[must_use]
    pub fn can_increment(&self) -> bool {
        self.available
            && self
                .stock_quantity()
                .is_some_and(|stock| self.quantity < stock)
    }

    /// Whether the line asks for more than the current stock level.
    #[must_use]
    pub fn exceeds_stock(&self) -> bool {
        self.stock_quantity()
            .is_none_or(|stock| self.quantity > stock)
    }
}

/// Cart Model
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub user_uuid: UserUuid,
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart for the given user.
    #[must_use]
    pub fn empty(user_uuid: UserUuid) -> Self {
        Self {
            user_uuid,
            lines: Vec::new(),
        }
    }

    /// Join stored items with live product records, keeping item order.
    #[must_use]
    pub fn materialize(
        user_uuid: UserUuid,
        items: Vec<CartItemRecord>,
        products: &FxHashMap<ProductUuid, ProductRecord>,
    ) -> Self {
        let lines = items
            .into_iter()
            .map(|item| {
                let product = products.get(&item.product_uuid);

                CartLine {
                    product_uuid: item.product_uuid,
                    quantity: item.quantity,
                    product: product.map(ProductSnapshot::from),
                    available: product.is_some_and(ProductRecord::is_purchasable),
                    added_at: item.created_at,
                }
            })
            .collect();

        Self { user_uuid, lines }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line for the given product, if present.
    #[must_use]
    pub fn line(&self, product: ProductUuid) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_uuid == product)
    }

    /// Sum of quantities over every line.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum()
    }

    /// Sum of `quantity × live unit price` over purchasable lines.
    ///
    /// Floats with the catalog until checkout freezes prices. `None` when the
    /// amount does not fit in `u64`, which checkout rejects as well.
    #[must_use]
    pub fn subtotal(&self) -> Option<u64> {
        self.lines
            .iter()
            .filter(|line| line.available)
            .try_fold(0_u64, |total, line| total.checked_add(line.line_total()?))
    }
}
