//! Reviews Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    reviews::{
        data::{NewReview, ReviewQuery, ReviewUpdate},
        records::{Review, ReviewId},
    },
    users::records::UserId,
};

const LIST_REVIEWS_SQL: &str = include_str!("sql/list_reviews.sql");
const REVIEW_EXISTS_SQL: &str = include_str!("sql/review_exists.sql");
const CREATE_REVIEW_SQL: &str = include_str!("sql/create_review.sql");
const LOCK_REVIEW_OWNER_SQL: &str = include_str!("sql/lock_review_owner.sql");
const UPDATE_REVIEW_SQL: &str = include_str!("sql/update_review.sql");
const DELETE_REVIEW_SQL: &str = include_str!("sql/delete_review.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReviewsRepository;

impl PgReviewsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_reviews(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: ReviewQuery,
    ) -> Result<Vec<Review>, sqlx::Error> {
        query_as::<Postgres, Review>(LIST_REVIEWS_SQL)
            .bind(filter.business_user_id.map(UserId::into_i64))
            .bind(filter.reviewer_id.map(UserId::into_i64))
            .bind(filter.ordering.map(|ordering| ordering.as_key()))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn review_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        business: UserId,
        reviewer: UserId,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(REVIEW_EXISTS_SQL)
            .bind(business.into_i64())
            .bind(reviewer.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "reviews.repository.create_review",
        skip(self, tx, review),
        fields(business = %review.business_user, reviewer = %reviewer),
        err
    )]
    pub(crate) async fn create_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        reviewer: UserId,
        review: &NewReview,
    ) -> Result<Review, sqlx::Error> {
        query_as::<Postgres, Review>(CREATE_REVIEW_SQL)
            .bind(review.business_user.into_i64())
            .bind(reviewer.into_i64())
            .bind(review.rating)
            .bind(&review.description)
            .fetch_one(&mut **tx)
            .await
    }

    /// Lock the review row for the rest of the transaction and return its
    /// reviewer.
    pub(crate) async fn lock_review_owner(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        review: ReviewId,
    ) -> Result<Option<UserId>, sqlx::Error> {
        let owner: Option<i64> = query_scalar(LOCK_REVIEW_OWNER_SQL)
            .bind(review.into_i64())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(owner.map(UserId::from_i64))
    }

    #[tracing::instrument(
        name = "reviews.repository.update_review",
        skip(self, tx, update),
        fields(review = %review),
        err
    )]
    pub(crate) async fn update_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        review: ReviewId,
        update: &ReviewUpdate,
    ) -> Result<Review, sqlx::Error> {
        query_as::<Postgres, Review>(UPDATE_REVIEW_SQL)
            .bind(review.into_i64())
            .bind(update.rating)
            .bind(update.description.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "reviews.repository.delete_review",
        skip(self, tx),
        fields(review = %review),
        err
    )]
    pub(crate) async fn delete_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        review: ReviewId,
    ) -> Result<u64, sqlx::Error> {
        Ok(query(DELETE_REVIEW_SQL)
            .bind(review.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected())
    }
}

impl<'r> FromRow<'r, PgRow> for Review {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: ReviewId::from_i64(row.try_get("id")?),
            business_user: UserId::from_i64(row.try_get("business_user_id")?),
            reviewer: UserId::from_i64(row.try_get("reviewer_id")?),
            rating: row.try_get("rating")?,
            description: row.try_get("description")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
