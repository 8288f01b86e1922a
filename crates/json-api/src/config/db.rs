//! Database Config

use std::time::Duration;

use clap::Args;
use storefront_app::database::PoolOptions;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Maximum pooled connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 10_u32)]
    pub database_max_connections: u32,

    /// Seconds to wait for a pooled connection
    #[arg(long, env = "DATABASE_ACQUIRE_TIMEOUT_SECONDS", default_value_t = 5_u64)]
    pub database_acquire_timeout_seconds: u64,

    /// Milliseconds a transaction may wait on a row or user lock
    #[arg(long, env = "DATABASE_LOCK_TIMEOUT_MS", default_value_t = 5_000_u64)]
    pub database_lock_timeout_ms: u64,

    /// Apply pending migrations on startup
    #[arg(long, env = "DATABASE_RUN_MIGRATIONS", default_value_t = false)]
    pub database_run_migrations: bool,
}

impl DatabaseConfig {
    /// Pool settings for the application context.
    #[must_use]
    pub fn pool_options(&self) -> PoolOptions {
        PoolOptions {
            max_connections: self.database_max_connections,
            acquire_timeout: Duration::from_secs(self.database_acquire_timeout_seconds),
            lock_timeout: Duration::from_millis(self.database_lock_timeout_ms),
        }
    }
}
