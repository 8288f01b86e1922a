//! Checkout Config

use clap::Args;
use storefront_app::domain::checkout::pricing::ShippingPolicy;

/// Checkout pricing settings, in minor currency units.
#[derive(Debug, Args)]
pub struct CheckoutConfig {
    /// Subtotals above this ship for free
    #[arg(long, env = "FREE_SHIPPING_THRESHOLD", default_value_t = 50_00_u64)]
    pub free_shipping_threshold: u64,

    /// Flat shipping fee charged at or below the threshold
    #[arg(long, env = "FLAT_SHIPPING_FEE", default_value_t = 9_99_u64)]
    pub flat_shipping_fee: u64,
}

impl CheckoutConfig {
    /// Shipping rule applied at checkout.
    #[must_use]
    pub fn shipping_policy(&self) -> ShippingPolicy {
        ShippingPolicy {
            free_shipping_threshold: self.free_shipping_threshold,
            flat_fee: self.flat_shipping_fee,
        }
    }
}
