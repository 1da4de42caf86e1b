//! Stats Repository

use rust_decimal::Decimal;
use sqlx::{Postgres, Row, Transaction, query};

use crate::domain::stats::records::BaseInfo;

const BASE_INFO_SQL: &str = include_str!("sql/base_info.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgStatsRepository;

impl PgStatsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn base_info(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<BaseInfo, sqlx::Error> {
        let row = query(BASE_INFO_SQL).fetch_one(&mut **tx).await?;

        Ok(BaseInfo {
            review_count: count(row.try_get("review_count")?, "review_count")?,
            average_rating: row.try_get::<Decimal, _>("average_rating")?,
            business_profile_count: count(
                row.try_get("business_profile_count")?,
                "business_profile_count",
            )?,
            offer_count: count(row.try_get("offer_count")?, "offer_count")?,
        })
    }
}

fn count(value: i64, column: &str) -> Result<u64, sqlx::Error> {
    u64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}
