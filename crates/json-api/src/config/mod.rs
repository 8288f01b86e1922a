//! Server configuration module

use clap::Parser;

use crate::config::{
    checkout::CheckoutConfig,
    db::DatabaseConfig,
    identity::IdentityConfig,
    logging::LoggingConfig,
    observability::ObservabilityConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod checkout;
pub(crate) mod db;
pub(crate) mod identity;
pub(crate) mod logging;
pub(crate) mod observability;
pub(crate) mod server;

/// Storefront JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "storefront-json", about = "Storefront JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Checkout pricing settings.
    #[command(flatten)]
    pub checkout: CheckoutConfig,

    /// Trusted identity header settings.
    #[command(flatten)]
    pub identity: IdentityConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use storefront_app::domain::checkout::pricing::ShippingPolicy;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_only_need_a_database_url() -> TestResult {
        let config =
            ServerConfig::try_parse_from(["storefront-json", "--database-url", "postgres://db"])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(config.database.database_url, "postgres://db");
        assert_eq!(
            config.database.pool_options().lock_timeout,
            Duration::from_secs(5)
        );
        assert_eq!(config.checkout.shipping_policy(), ShippingPolicy::default());
        assert_eq!(config.identity.user_header, "x-user-uuid");
        assert_eq!(config.identity.admin_header, "x-user-admin");

        Ok(())
    }

    #[test]
    fn checkout_pricing_is_configurable() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "storefront-json",
            "--database-url",
            "postgres://db",
            "--free-shipping-threshold",
            "10000",
            "--flat-shipping-fee",
            "499",
        ])?;

        assert_eq!(
            config.checkout.shipping_policy(),
            ShippingPolicy {
                free_shipping_threshold: 100_00,
                flat_fee: 4_99
            }
        );

        Ok(())
    }
}
