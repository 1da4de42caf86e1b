//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    offers::records::{OfferDetailId, OfferType},
    orders::records::{Order, OrderId, OrderStatus},
    users::records::UserId,
};

const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const FIND_DETAIL_OWNER_SQL: &str = include_str!("sql/find_detail_owner.sql");
const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const LOCK_ORDER_OWNER_SQL: &str = include_str!("sql/lock_order_owner.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");
const DELETE_ORDER_SQL: &str = include_str!("sql/delete_order.sql");
const COUNT_ORDERS_SQL: &str = include_str!("sql/count_orders.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ORDERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    /// Owner of the offer a detail belongs to, or `None` for an unknown detail.
    pub(crate) async fn find_detail_owner(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        detail: OfferDetailId,
    ) -> Result<Option<UserId>, sqlx::Error> {
        let owner: Option<i64> = query_scalar(FIND_DETAIL_OWNER_SQL)
            .bind(detail.into_i64())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(owner.map(UserId::from_i64))
    }

    #[tracing::instrument(
        name = "orders.repository.create_order",
        skip(self, tx),
        fields(detail = %detail, business = %business, customer = %customer),
        err
    )]
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        detail: OfferDetailId,
        business: UserId,
        customer: UserId,
    ) -> Result<OrderId, sqlx::Error> {
        let id: i64 = query_scalar(CREATE_ORDER_SQL)
            .bind(detail.into_i64())
            .bind(business.into_i64())
            .bind(customer.into_i64())
            .fetch_one(&mut **tx)
            .await?;

        Ok(OrderId::from_i64(id))
    }

    /// Lock the order row for the rest of the transaction and return its
    /// business user.
    pub(crate) async fn lock_order_owner(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
    ) -> Result<Option<UserId>, sqlx::Error> {
        let owner: Option<i64> = query_scalar(LOCK_ORDER_OWNER_SQL)
            .bind(order.into_i64())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(owner.map(UserId::from_i64))
    }

    #[tracing::instrument(
        name = "orders.repository.update_order_status",
        skip(self, tx),
        fields(order = %order, status = %status),
        err
    )]
    pub(crate) async fn update_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
        status: OrderStatus,
    ) -> Result<u64, sqlx::Error> {
        Ok(query(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_i64())
            .bind(status.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected())
    }

    #[tracing::instrument(
        name = "orders.repository.delete_order",
        skip(self, tx),
        fields(order = %order),
        err
    )]
    pub(crate) async fn delete_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
    ) -> Result<u64, sqlx::Error> {
        Ok(query(DELETE_ORDER_SQL)
            .bind(order.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected())
    }

    /// Orders of a business user, optionally narrowed to one status.
    pub(crate) async fn count_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        business: UserId,
        status: Option<OrderStatus>,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_ORDERS_SQL)
            .bind(business.into_i64())
            .bind(status.map(OrderStatus::as_str))
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "count".to_string(),
            source: Box::new(e),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;
        let offer_type: String = row.try_get("offer_type")?;

        Ok(Self {
            id: OrderId::from_i64(row.try_get("id")?),
            offer_detail_id: OfferDetailId::from_i64(row.try_get("offer_detail_id")?),
            business_user: UserId::from_i64(row.try_get("business_user_id")?),
            customer_user: row
                .try_get::<Option<i64>, _>("customer_user_id")?
                .map(UserId::from_i64),
            status: status
                .parse::<OrderStatus>()
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "status".to_string(),
                    source: Box::new(e),
                })?,
            title: row.try_get("title")?,
            revisions: row.try_get("revisions")?,
            delivery_time_in_days: row.try_get("delivery_time_in_days")?,
            price: row.try_get("price")?,
            features: row.try_get("features")?,
            offer_type: offer_type
                .parse::<OfferType>()
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "offer_type".to_string(),
                    source: Box::new(e),
                })?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
