//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db, PoolOptions},
    domain::{
        carts::{CartsService, PgCartsService},
        checkout::{CheckoutService, PgCheckoutService, pricing::ShippingPolicy},
        orders::{OrdersService, PgOrdersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

/// Settings needed to build an [`AppContext`].
#[derive(Debug, Clone, Default)]
pub struct AppSettings {
    pub pool: PoolOptions,
    pub shipping: ShippingPolicy,
    pub run_migrations: bool,
}

#[derive(Clone)]
pub struct AppContext {
    pub carts: Arc<dyn CartsService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub orders: Arc<dyn OrdersService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or applying
    /// migrations fails.
    pub async fn from_database_url(url: &str, settings: &AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect_with(url, &settings.pool)
            .await
            .map_err(AppInitError::Database)?;

        if settings.run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;
        }

        Ok(Self::from_db(
            Db::with_lock_timeout(pool, settings.pool.lock_timeout),
            settings.shipping,
        ))
    }

    #[must_use]
    pub fn from_db(db: Db, shipping: ShippingPolicy) -> Self {
        Self {
            carts: Arc::new(PgCartsService::new(db.clone())),
            checkout: Arc::new(PgCheckoutService::new(db.clone(), shipping)),
            orders: Arc::new(PgOrdersService::new(db)),
        }
    }
}
