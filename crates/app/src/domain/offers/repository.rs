//! Offers Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    offers::{
        data::{NewOffer, OfferDetailUpdate, OfferQuery, OfferUpdate},
        records::{Offer, OfferDetailId, OfferDetailRecord, OfferId, OfferRecord, OfferType},
    },
    users::records::{UserId, UserSummary},
};

const LIST_OFFERS_SQL: &str = include_str!("sql/list_offers.sql");
const COUNT_OFFERS_SQL: &str = include_str!("sql/count_offers.sql");
const GET_OFFER_SQL: &str = include_str!("sql/get_offer.sql");
const LOCK_OFFER_OWNER_SQL: &str = include_str!("sql/lock_offer_owner.sql");
const LIST_OFFER_DETAILS_SQL: &str = include_str!("sql/list_offer_details.sql");
const GET_OFFER_DETAIL_SQL: &str = include_str!("sql/get_offer_detail.sql");
const CREATE_OFFER_SQL: &str = include_str!("sql/create_offer.sql");
const CREATE_OFFER_DETAIL_SQL: &str = include_str!("sql/create_offer_detail.sql");
const UPDATE_OFFER_SQL: &str = include_str!("sql/update_offer.sql");
const UPDATE_OFFER_DETAIL_SQL: &str = include_str!("sql/update_offer_detail.sql");
const DELETE_OFFER_SQL: &str = include_str!("sql/delete_offer.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOffersRepository;

impl PgOffersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn count_offers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &OfferQuery,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_OFFERS_SQL)
            .bind(filter.creator_id.map(UserId::into_i64))
            .bind(filter.min_price)
            .bind(filter.max_delivery_time)
            .bind(filter.search_pattern())
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "count".to_string(),
            source: Box::new(e),
        })
    }

    pub(crate) async fn list_offers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &OfferQuery,
    ) -> Result<Vec<Offer>, sqlx::Error> {
        let records = query_as::<Postgres, OfferRecord>(LIST_OFFERS_SQL)
            .bind(filter.creator_id.map(UserId::into_i64))
            .bind(filter.min_price)
            .bind(filter.max_delivery_time)
            .bind(filter.search_pattern())
            .bind(filter.ordering.map(|ordering| ordering.as_key()))
            .bind(filter.page.limit())
            .bind(filter.page.offset())
            .fetch_all(&mut **tx)
            .await?;

        let ids: Vec<i64> = records.iter().map(|record| record.id.into_i64()).collect();

        let mut details: FxHashMap<OfferId, Vec<OfferDetailRecord>> = FxHashMap::default();

        for detail in self.list_offer_details(tx, &ids).await? {
            details.entry(detail.offer_id).or_default().push(detail);
        }

        Ok(records
            .into_iter()
            .map(|record| {
                let own = details.remove(&record.id).unwrap_or_default();

                Offer::new(record, own)
            })
            .collect())
    }

    pub(crate) async fn get_offer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferId,
    ) -> Result<Offer, sqlx::Error> {
        let record = query_as::<Postgres, OfferRecord>(GET_OFFER_SQL)
            .bind(offer.into_i64())
            .fetch_one(&mut **tx)
            .await?;

        let details = self.list_offer_details(tx, &[offer.into_i64()]).await?;

        Ok(Offer::new(record, details))
    }

    /// Lock the offer row for the rest of the transaction and return its owner.
    pub(crate) async fn lock_offer_owner(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferId,
    ) -> Result<Option<UserId>, sqlx::Error> {
        let owner: Option<i64> = query_scalar(LOCK_OFFER_OWNER_SQL)
            .bind(offer.into_i64())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(owner.map(UserId::from_i64))
    }

    async fn list_offer_details(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offers: &[i64],
    ) -> Result<Vec<OfferDetailRecord>, sqlx::Error> {
        if offers.is_empty() {
            return Ok(Vec::new());
        }

        query_as::<Postgres, OfferDetailRecord>(LIST_OFFER_DETAILS_SQL)
            .bind(offers)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_offer_detail(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        detail: OfferDetailId,
    ) -> Result<OfferDetailRecord, sqlx::Error> {
        query_as::<Postgres, OfferDetailRecord>(GET_OFFER_DETAIL_SQL)
            .bind(detail.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "offers.repository.create_offer",
        skip(self, tx, offer, tiers),
        fields(owner = %owner, title = %offer.title),
        err
    )]
    pub(crate) async fn create_offer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserId,
        offer: &NewOffer,
        tiers: &[OfferType],
    ) -> Result<OfferId, sqlx::Error> {
        let offer_id: i64 = query_scalar(CREATE_OFFER_SQL)
            .bind(owner.into_i64())
            .bind(&offer.title)
            .bind(offer.image.as_deref())
            .bind(&offer.description)
            .fetch_one(&mut **tx)
            .await?;

        for (detail, tier) in offer.details.iter().zip(tiers) {
            query(CREATE_OFFER_DETAIL_SQL)
                .bind(offer_id)
                .bind(&detail.title)
                .bind(detail.revisions)
                .bind(detail.delivery_time_in_days)
                .bind(detail.price)
                .bind(tier.as_str())
                .bind(&detail.features)
                .execute(&mut **tx)
                .await?;
        }

        Ok(OfferId::from_i64(offer_id))
    }

    #[tracing::instrument(
        name = "offers.repository.update_offer",
        skip(self, tx, update),
        fields(offer = %offer),
        err
    )]
    pub(crate) async fn update_offer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferId,
        update: &OfferUpdate,
    ) -> Result<u64, sqlx::Error> {
        Ok(query(UPDATE_OFFER_SQL)
            .bind(offer.into_i64())
            .bind(update.title.as_deref())
            .bind(update.image.is_some())
            .bind(update.image.as_ref().and_then(Option::as_deref))
            .bind(update.description.as_deref())
            .execute(&mut **tx)
            .await?
            .rows_affected())
    }

    #[tracing::instrument(
        name = "offers.repository.update_offer_detail",
        skip(self, tx, update),
        fields(detail = %detail),
        err
    )]
    pub(crate) async fn update_offer_detail(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        detail: OfferDetailId,
        update: &OfferDetailUpdate,
    ) -> Result<OfferDetailRecord, sqlx::Error> {
        query_as::<Postgres, OfferDetailRecord>(UPDATE_OFFER_DETAIL_SQL)
            .bind(detail.into_i64())
            .bind(update.title.as_deref())
            .bind(update.revisions)
            .bind(update.delivery_time_in_days)
            .bind(update.price)
            .bind(update.features.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "offers.repository.delete_offer",
        skip(self, tx),
        fields(offer = %offer),
        err
    )]
    pub(crate) async fn delete_offer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferId,
    ) -> Result<u64, sqlx::Error> {
        Ok(query(DELETE_OFFER_SQL)
            .bind(offer.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected())
    }
}

impl<'r> FromRow<'r, PgRow> for OfferRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: OfferId::from_i64(row.try_get("id")?),
            user_id: UserId::from_i64(row.try_get("user_id")?),
            title: row.try_get("title")?,
            image: row.try_get("image")?,
            description: row.try_get("description")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            owner: UserSummary {
                first_name: row.try_get("first_name")?,
                last_name: row.try_get("last_name")?,
                username: row.try_get("username")?,
            },
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OfferDetailRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let offer_type: String = row.try_get("offer_type")?;

        let offer_type = offer_type
            .parse::<OfferType>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "offer_type".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: OfferDetailId::from_i64(row.try_get("id")?),
            offer_id: OfferId::from_i64(row.try_get("offer_id")?),
            title: row.try_get("title")?,
            revisions: row.try_get("revisions")?,
            delivery_time_in_days: row.try_get("delivery_time_in_days")?,
            price: row.try_get::<Decimal, _>("price")?,
            offer_type,
            features: row.try_get("features")?,
        })
    }
}
