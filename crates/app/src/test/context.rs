//! Test context for service-level integration tests.

use sqlx::query;

use crate::{
    database::Db,
    domain::{
        carts::PgCartsService,
        catalog::records::ProductUuid,
        checkout::{PgCheckoutService, pricing::ShippingPolicy},
        orders::PgOrdersService,
    },
    identity::{Identity, UserUuid},
};

use super::db::TestDb;

pub(crate) struct TestContext {
    pub db: TestDb,
    pub user_uuid: UserUuid,
    pub admin_uuid: UserUuid,
    pub carts: PgCartsService,
    pub checkout: PgCheckoutService,
    pub orders: PgOrdersService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            carts: PgCartsService::new(db.clone()),
            checkout: PgCheckoutService::new(db.clone(), ShippingPolicy::default()),
            orders: PgOrdersService::new(db),
            user_uuid: UserUuid::new(),
            admin_uuid: UserUuid::new(),
            db: test_db,
        }
    }

    /// The default signed-in customer.
    pub fn customer(&self) -> Option<Identity> {
        Some(Identity::customer(self.user_uuid))
    }

    /// A signed-in administrator.
    pub fn admin(&self) -> Option<Identity> {
        Some(Identity::admin(self.admin_uuid))
    }

    /// Change a product's price and stock, as the catalog's own write path would.
    pub async fn update_product(
        &self,
        product: ProductUuid,
        price: u64,
        stock_quantity: u32,
    ) -> Result<(), sqlx::Error> {
        query("UPDATE products SET price = $2, stock_quantity = $3, updated_at = now() WHERE uuid = $1")
            .bind(product.into_uuid())
            .bind(i64::try_from(price).unwrap_or(i64::MAX))
            .bind(i32::try_from(stock_quantity).unwrap_or(i32::MAX))
            .execute(self.db.pool())
            .await?;

        Ok(())
    }

    /// Remove a product outright, as a catalog hard delete would.
    pub async fn delete_product(&self, product: ProductUuid) -> Result<(), sqlx::Error> {
        query("DELETE FROM products WHERE uuid = $1")
            .bind(product.into_uuid())
            .execute(self.db.pool())
            .await?;

        Ok(())
    }

    pub async fn deactivate_product(&self, product: ProductUuid) -> Result<(), sqlx::Error> {
        query("UPDATE products SET is_active = FALSE, updated_at = now() WHERE uuid = $1")
            .bind(product.into_uuid())
            .execute(self.db.pool())
            .await?;

        Ok(())
    }
}
