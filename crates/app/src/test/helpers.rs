//! Test Helpers

use sqlx::query_as;
use testresult::TestResult;

use crate::{
    domain::{
        carts::CartsService,
        catalog::records::{ProductRecord, ProductUuid},
        checkout::CheckoutService,
        orders::models::Order,
    },
    identity::Identity,
    test::TestContext,
};

const CREATE_PRODUCT_SQL: &str = "
    INSERT INTO products (uuid, name, price, stock_quantity, image_url)
    VALUES ($1, $2, $3, $4, $5)
    RETURNING
        uuid, name, price, stock_quantity, image_url, is_active,
        created_at, updated_at, deleted_at
";

/// Seed an active catalog product.
pub(crate) async fn create_product(
    ctx: &TestContext,
    price: u64,
    stock_quantity: u32,
) -> Result<ProductRecord, sqlx::Error> {
    let uuid = ProductUuid::new();

    query_as::<_, ProductRecord>(CREATE_PRODUCT_SQL)
        .bind(uuid.into_uuid())
        .bind(format!("Product {uuid}"))
        .bind(i64::try_from(price).unwrap_or(i64::MAX))
        .bind(i32::try_from(stock_quantity).unwrap_or(i32::MAX))
        .bind(format!("/images/{uuid}.png"))
        .fetch_one(ctx.db.pool())
        .await
}

/// Check out a single-line cart for `identity`.
pub(crate) async fn place_order(
    ctx: &TestContext,
    identity: Option<Identity>,
    price: u64,
    quantity: u32,
) -> TestResult<Order> {
    let product = create_product(ctx, price, quantity).await?;

    ctx.carts.add_item(identity, product.uuid, quantity).await?;

    let order = ctx
        .checkout
        .checkout(identity, "1 Main St, Springfield, 12345, US".to_string())
        .await?;

    Ok(order)
}
