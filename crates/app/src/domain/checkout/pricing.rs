//! Order totals and the shipping rule.

/// Largest amount, in minor units, an order column can store.
pub const MAX_AMOUNT: u64 = i64::MAX.unsigned_abs();

const DEFAULT_FREE_SHIPPING_THRESHOLD: u64 = 50_00;
const DEFAULT_FLAT_FEE: u64 = 9_99;

/// Flat-rate shipping, waived once the subtotal exceeds a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingPolicy {
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold: u64,
    pub flat_fee: u64,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: DEFAULT_FREE_SHIPPING_THRESHOLD,
            flat_fee: DEFAULT_FLAT_FEE,
        }
    }
}

impl ShippingPolicy {
    #[must_use]
    pub const fn shipping_fee(&self, subtotal: u64) -> u64 {
        if subtotal > self.free_shipping_threshold {
            0
        } else {
            self.flat_fee
        }
    }

    /// Price an order, or `None` when the total would not fit [`MAX_AMOUNT`].
    #[must_use]
    pub fn quote(&self, subtotal: u64) -> Option<Quote> {
        let shipping_fee = self.shipping_fee(subtotal);
        let total = subtotal
            .checked_add(shipping_fee)
            .filter(|total| *total <= MAX_AMOUNT)?;

        Some(Quote {
            subtotal,
            shipping_fee,
            total,
        })
    }
}

/// Final amounts for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub subtotal: u64,
    pub shipping_fee: u64,
    pub total: u64,
}
