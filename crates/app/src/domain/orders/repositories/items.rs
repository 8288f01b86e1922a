//! Order Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::{
    domain::{
        catalog::records::ProductUuid,
        columns::{amount_to_i64, count_to_i32, try_get_amount, try_get_count},
        orders::{
            data::NewOrderItem,
            records::{OrderItemRecord, OrderItemUuid, OrderUuid},
        },
    },
    uuids::into_uuids,
};

const CREATE_ORDER_ITEMS_SQL: &str = include_str!("../sql/create_order_items.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("../sql/list_order_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert every line of an order in one statement, numbering them in
    /// slice order.
    pub(crate) async fn create_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        items: &[NewOrderItem],
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        let len = items.len();

        let mut uuids: Vec<Uuid> = Vec::with_capacity(len);
        let mut products: Vec<Uuid> = Vec::with_capacity(len);
        let mut quantities: Vec<i32> = Vec::with_capacity(len);
        let mut unit_prices: Vec<i64> = Vec::with_capacity(len);
        let mut positions: Vec<i32> = Vec::with_capacity(len);

        for (position, item) in items.iter().enumerate() {
            uuids.push(item.uuid.into_uuid());
            products.push(item.product_uuid.into_uuid());
            quantities.push(count_to_i32(item.quantity, "quantity")?);
            unit_prices.push(amount_to_i64(item.unit_price, "unit_price")?);
            positions.push(i32::try_from(position).map_err(|e| {
                sqlx::Error::ColumnDecode {
                    index: "position".to_string(),
                    source: Box::new(e),
                }
            })?);
        }

        let mut records = query_as::<Postgres, OrderItemRecord>(CREATE_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .bind(uuids)
            .bind(products)
            .bind(quantities)
            .bind(unit_prices)
            .bind(positions)
            .fetch_all(&mut **tx)
            .await?;

        records.sort_by_key(|record| record.position);

        Ok(records)
    }

    /// Read the lines of the given orders, grouped by order in position order.
    pub(crate) async fn list_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<FxHashMap<OrderUuid, Vec<OrderItemRecord>>, sqlx::Error> {
        if orders.is_empty() {
            return Ok(FxHashMap::default());
        }

        let records = query_as::<Postgres, OrderItemRecord>(LIST_ORDER_ITEMS_SQL)
            .bind(into_uuids(orders))
            .fetch_all(&mut **tx)
            .await?;

        let mut grouped: FxHashMap<OrderUuid, Vec<OrderItemRecord>> = FxHashMap::default();

        for record in records {
            grouped.entry(record.order_uuid).or_default().push(record);
        }

        Ok(grouped)
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity: try_get_count(row, "quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
            position: try_get_count(row, "position")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
