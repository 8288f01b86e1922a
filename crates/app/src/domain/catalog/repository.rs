//! Catalog Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    domain::{
        catalog::records::{ProductRecord, ProductUuid},
        columns::{try_get_amount, try_get_count},
    },
    uuids::into_uuids,
};

const GET_PRODUCTS_SQL: &str = include_str!("sql/get_products.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Read the live records for the given products, keyed by uuid.
    ///
    /// Soft-deleted products are included so callers can flag them; products
    /// missing entirely are simply absent from the map.
    pub(crate) async fn get_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductUuid],
    ) -> Result<FxHashMap<ProductUuid, ProductRecord>, sqlx::Error> {
        if products.is_empty() {
            return Ok(FxHashMap::default());
        }

        let records = query_as::<Postgres, ProductRecord>(GET_PRODUCTS_SQL)
            .bind(into_uuids(products))
            .fetch_all(&mut **tx)
            .await?;

        Ok(records
            .into_iter()
            .map(|record| (record.uuid, record))
            .collect())
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            price: try_get_amount(row, "price")?,
            stock_quantity: try_get_count(row, "stock_quantity")?,
            image_url: row.try_get("image_url")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
