//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        carts::{errors::CartsServiceError, models::Cart, reader::CartReader},
        catalog::records::ProductUuid,
    },
    identity::{Identity, require},
};

/// Largest quantity a single cart line can hold.
pub const MAX_LINE_QUANTITY: u32 = i32::MAX.unsigned_abs();

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    reader: CartReader,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            reader: CartReader::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    #[tracing::instrument(
        name = "carts.service.get_cart",
        skip(self, identity),
        fields(user_uuid = tracing::field::Empty),
        err
    )]
    async fn get_cart(&self, identity: Option<Identity>) -> Result<Cart, CartsServiceError> {
        let identity = require(identity)?;

        Span::current().record("user_uuid", tracing::field::display(identity.user));

        let mut tx = self.db.begin_transaction().await?;

        let cart = self.reader.read_cart(&mut tx, identity.user).await?;

        tx.commit().await?;

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.add_item",
        skip(self, identity),
        fields(user_uuid = tracing::field::Empty, product_uuid = %product),
        err
    )]
    async fn add_item(
        &self,
        identity: Option<Identity>,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError> {
        let identity = require(identity)?;

        Span::current().record("user_uuid", tracing::field::display(identity.user));

        if quantity == 0 || quantity > MAX_LINE_QUANTITY {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin_user_transaction(identity.user).await?;

        if !self.reader.product_exists(&mut tx, product).await? {
            return Err(CartsServiceError::ProductNotFound);
        }

        let item = self
            .reader
            .items()
            .add_quantity(&mut tx, identity.user, product, quantity)
            .await?;

        let cart = self.reader.read_cart(&mut tx, identity.user).await?;

        tx.commit().await?;

        info!(quantity = item.quantity, "added item to cart");

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.set_quantity",
        skip(self, identity),
        fields(user_uuid = tracing::field::Empty, product_uuid = %product),
        err
    )]
    async fn set_quantity(
        &self,
        identity: Option<Identity>,
        product: ProductUuid,
        quantity: i64,
    ) -> Result<Cart, CartsServiceError> {
        let identity = require(identity)?;

        Span::current().record("user_uuid", tracing::field::display(identity.user));

        let quantity = match u32::try_from(quantity) {
            Ok(0) => None,
            Ok(quantity) if quantity <= MAX_LINE_QUANTITY => Some(quantity),
            Ok(_) => return Err(CartsServiceError::InvalidQuantity),
            Err(_) if quantity < 0 => None,
            Err(_) => return Err(CartsServiceError::InvalidQuantity),
        };

        let mut tx = self.db.begin_user_transaction(identity.user).await?;

        match quantity {
            Some(quantity) => {
                if !self.reader.product_exists(&mut tx, product).await? {
                    return Err(CartsServiceError::ProductNotFound);
                }

                self.reader
                    .items()
                    .set_quantity(&mut tx, identity.user, product, quantity)
                    .await?;
            }
            None => {
                self.reader
                    .items()
                    .delete_item(&mut tx, identity.user, product)
                    .await?;
            }
        }

        let cart = self.reader.read_cart(&mut tx, identity.user).await?;

        tx.commit().await?;

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.remove_item",
        skip(self, identity),
        fields(user_uuid = tracing::field::Empty, product_uuid = %product),
        err
    )]
    async fn remove_item(
        &self,
        identity: Option<Identity>,
        product: ProductUuid,
    ) -> Result<Cart, CartsServiceError> {
        let identity = require(identity)?;

        Span::current().record("user_uuid", tracing::field::display(identity.user));

        let mut tx = self.db.begin_user_transaction(identity.user).await?;

        self.reader
            .items()
            .delete_item(&mut tx, identity.user, product)
            .await?;

        let cart = self.reader.read_cart(&mut tx, identity.user).await?;

        tx.commit().await?;

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.clear",
        skip(self, identity),
        fields(user_uuid = tracing::field::Empty, removed = tracing::field::Empty),
        err
    )]
    async fn clear(&self, identity: Option<Identity>) -> Result<Cart, CartsServiceError> {
        let identity = require(identity)?;

        let span = Span::current();

        span.record("user_uuid", tracing::field::display(identity.user));

        let mut tx = self.db.begin_user_transaction(identity.user).await?;

        let removed = self.reader.items().delete_all(&mut tx, identity.user).await?;

        tx.commit().await?;

        span.record("removed", removed);

        Ok(Cart::empty(identity.user))
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Materialize the caller's cart against the live catalog.
    async fn get_cart(&self, identity: Option<Identity>) -> Result<Cart, CartsServiceError>;

    /// Add `quantity` units of a product, merging with an existing line.
    async fn add_item(
        &self,
        identity: Option<Identity>,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError>;

    /// Overwrite a line's quantity; zero or less removes the line.
    async fn set_quantity(
        &self,
        identity: Option<Identity>,
        product: ProductUuid,
        quantity: i64,
    ) -> Result<Cart, CartsServiceError>;

    /// Remove a line. Removing an absent line is not an error.
    async fn remove_item(
        &self,
        identity: Option<Identity>,
        product: ProductUuid,
    ) -> Result<Cart, CartsServiceError>;

    /// Remove every line of the caller's cart.
    async fn clear(&self, identity: Option<Identity>) -> Result<Cart, CartsServiceError>;
}
