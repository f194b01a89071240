//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    customers::records::CustomerId,
    orders::{
        data::NewOrder,
        records::{OrderId, OrderRecord},
    },
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const LIST_ORDERS_FOR_CUSTOMER_SQL: &str = include_str!("../sql/list_orders_for_customer.sql");
const GET_ORDER_FOR_CUSTOMER_SQL: &str = include_str!("../sql/get_order_for_customer.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: NewOrder,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.customer_id.into_i64())
            .bind(order.address)
            .bind(order.phone)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders_for_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerId,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_FOR_CUSTOMER_SQL)
            .bind(customer.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    /// The order only if `customer` owns it.
    pub(crate) async fn get_order_for_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
        customer: CustomerId,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_FOR_CUSTOMER_SQL)
            .bind(order.into_i64())
            .bind(customer.into_i64())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: OrderId::from_i64(row.try_get("id")?),
            customer_id: CustomerId::from_i64(row.try_get("customer_id")?),
            address: row.try_get("address")?,
            phone: row.try_get("phone")?,
            placed_at: row.try_get::<SqlxTimestamp, _>("placed_at")?.to_jiff(),
            status: row.try_get("status")?,
        })
    }
}
