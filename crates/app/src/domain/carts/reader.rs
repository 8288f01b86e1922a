//! Cart materialization shared by the cart and checkout services.

use sqlx::{Postgres, Transaction};

use crate::{
    domain::{
        carts::{models::Cart, repository::PgCartItemsRepository},
        catalog::{records::ProductUuid, repository::PgCatalogRepository},
    },
    identity::UserUuid,
};

#[derive(Debug, Clone, Default)]
pub(crate) struct CartReader {
    items: PgCartItemsRepository,
    catalog: PgCatalogRepository,
}

impl CartReader {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            items: PgCartItemsRepository::new(),
            catalog: PgCatalogRepository::new(),
        }
    }

    pub(crate) fn items(&self) -> &PgCartItemsRepository {
        &self.items
    }

    /// Whether the catalog holds a record for `product`, soft-deleted or not.
    pub(crate) async fn product_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<bool, sqlx::Error> {
        let products = self.catalog.get_products(tx, &[product]).await?;

        Ok(products.contains_key(&product))
    }

    /// Read the user's stored lines and join them with live catalog records.
    pub(crate) async fn read_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Cart, sqlx::Error> {
        let items = self.items.list_items(tx, user).await?;

        let products: Vec<ProductUuid> = items.iter().map(|item| item.product_uuid).collect();
        let catalog = self.catalog.get_products(tx, &products).await?;

        Ok(Cart::materialize(user, items, &catalog))
    }
}
