//! Reviews service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    auth::Principal,
    database::Db,
    domain::{
        reviews::{
            data::{NewReview, ReviewQuery, ReviewUpdate, validate_description, validate_rating},
            errors::ReviewsServiceError,
            records::{Review, ReviewId},
            repository::PgReviewsRepository,
        },
        users::PgUsersRepository,
        validation::ValidationError,
    },
    policy::{self, Operation, Resource},
};

#[derive(Debug, Clone)]
pub struct PgReviewsService {
    db: Db,
    repository: PgReviewsRepository,
    users: PgUsersRepository,
}

impl PgReviewsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgReviewsRepository::new(),
            users: PgUsersRepository::new(),
        }
    }

    /// Lock the review row and check that `principal` wrote it.
    async fn lock_own_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        principal: &Principal,
        review: ReviewId,
    ) -> Result<(), ReviewsServiceError> {
        let reviewer = self
            .repository
            .lock_review_owner(tx, review)
            .await?
            .ok_or(ReviewsServiceError::NotFound)?;

        policy::authorize_owner(principal, reviewer)?;

        Ok(())
    }
}

#[async_trait]
impl ReviewsService for PgReviewsService {
    async fn list_reviews(
        &self,
        principal: Option<Principal>,
        query: ReviewQuery,
    ) -> Result<Vec<Review>, ReviewsServiceError> {
        policy::authorize(principal.as_ref(), Resource::Reviews, Operation::List)?;

        let mut tx = self.db.begin_transaction().await?;

        let reviews = self.repository.list_reviews(&mut tx, query).await?;

        tx.commit().await?;

        Ok(reviews)
    }

    async fn create_review(
        &self,
        principal: Option<Principal>,
        review: NewReview,
    ) -> Result<Review, ReviewsServiceError> {
        let principal = policy::authorize(principal.as_ref(), Resource::Reviews, Operation::Create)?;

        let mut tx = self.db.begin_transaction().await?;

        self.users
            .find_business_user(&mut tx, review.business_user)
            .await?
            .ok_or(ValidationError::NotABusinessUser)?;

        validate_rating(review.rating)?;
        validate_description(&review.description)?;

        if self
            .repository
            .review_exists(&mut tx, review.business_user, principal.id)
            .await?
        {
            return Err(ReviewsServiceError::AlreadyReviewed);
        }

        // The unique constraint still rejects a duplicate that races past the
        // check above; it maps to `AlreadyReviewed` as well.
        let created = self
            .repository
            .create_review(&mut tx, principal.id, &review)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn authorize_review_update(
        &self,
        principal: Option<Principal>,
        review: ReviewId,
    ) -> Result<(), ReviewsServiceError> {
        let principal = policy::authorize(principal.as_ref(), Resource::Reviews, Operation::Update)?;

        let mut tx = self.db.begin_transaction().await?;

        self.lock_own_review(&mut tx, principal, review).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn update_review(
        &self,
        principal: Option<Principal>,
        review: ReviewId,
        update: ReviewUpdate,
    ) -> Result<Review, ReviewsServiceError> {
        let principal = policy::authorize(principal.as_ref(), Resource::Reviews, Operation::Update)?;

        let mut tx = self.db.begin_transaction().await?;

        self.lock_own_review(&mut tx, principal, review).await?;

        if let Some(rating) = update.rating {
            validate_rating(rating)?;
        }

        if let Some(description) = update.description.as_deref() {
            validate_description(description)?;
        }

        let updated = self
            .repository
            .update_review(&mut tx, review, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_review(
        &self,
        principal: Option<Principal>,
        review: ReviewId,
    ) -> Result<(), ReviewsServiceError> {
        let principal = policy::authorize(principal.as_ref(), Resource::Reviews, Operation::Delete)?;

        let mut tx = self.db.begin_transaction().await?;

        self.lock_own_review(&mut tx, principal, review).await?;

        self.repository.delete_review(&mut tx, review).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Lists reviews matching the filters. Any authenticated caller may list.
    async fn list_reviews(
        &self,
        principal: Option<Principal>,
        query: ReviewQuery,
    ) -> Result<Vec<Review>, ReviewsServiceError>;

    /// Records the calling customer's review of a business user.
    async fn create_review(
        &self,
        principal: Option<Principal>,
        review: NewReview,
    ) -> Result<Review, ReviewsServiceError>;

    /// Authentication, existence and ownership checks of `update_review`,
    /// without a payload.
    async fn authorize_review_update(
        &self,
        principal: Option<Principal>,
        review: ReviewId,
    ) -> Result<(), ReviewsServiceError>;

    /// Changes rating and/or description. Only the reviewer may do this.
    async fn update_review(
        &self,
        principal: Option<Principal>,
        review: ReviewId,
        update: ReviewUpdate,
    ) -> Result<Review, ReviewsServiceError>;

    /// Deletes a review. Only the reviewer may do this.
    async fn delete_review(
        &self,
        principal: Option<Principal>,
        review: ReviewId,
    ) -> Result<(), ReviewsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{reviews::data::ReviewOrdering, users::records::UserId},
        policy::PolicyError,
        test::{TestContext, helpers::count_rows},
    };

    use super::*;

    fn review_of(business: UserId, rating: i32) -> NewReview {
        NewReview {
            business_user: business,
            rating,
            description: "Sehr professionell".to_string(),
        }
    }

    #[tokio::test]
    async fn customer_creates_review_as_reviewer() -> TestResult {
        let ctx = TestContext::new().await;

        let review = ctx
            .reviews
            .create_review(
                Some(ctx.customer_principal()),
                review_of(ctx.business.id, 4),
            )
            .await?;

        assert_eq!(review.business_user, ctx.business.id);
        assert_eq!(review.reviewer, ctx.customer.id);
        assert_eq!(review.rating, 4);

        Ok(())
    }

    #[tokio::test]
    async fn second_review_of_same_business_is_forbidden() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.reviews
            .create_review(
                Some(ctx.customer_principal()),
                review_of(ctx.business.id, 4),
            )
            .await?;

        let result = ctx
            .reviews
            .create_review(
                Some(ctx.customer_principal()),
                review_of(ctx.business.id, 5),
            )
            .await;

        assert!(
            matches!(result, Err(ReviewsServiceError::AlreadyReviewed)),
            "expected AlreadyReviewed, got {result:?}"
        );
        assert_eq!(count_rows(&ctx, "reviews").await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_duplicates_persist_exactly_one_review() -> TestResult {
        let ctx = TestContext::new().await;
        let caller = Some(ctx.customer_principal());

        let (first, second) = tokio::join!(
            ctx.reviews
                .create_review(caller, review_of(ctx.business.id, 3)),
            ctx.reviews
                .create_review(caller, review_of(ctx.business.id, 5)),
        );

        let outcomes = [first, second];
        let created = outcomes.iter().filter(|result| result.is_ok()).count();
        let denied = outcomes
            .iter()
            .filter(|result| matches!(result, Err(ReviewsServiceError::AlreadyReviewed)))
            .count();

        assert_eq!(created, 1, "exactly one review should be created");
        assert_eq!(denied, 1, "the other attempt should be denied");
        assert_eq!(count_rows(&ctx, "reviews").await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn reviewing_a_customer_is_a_validation_error() {
        let ctx = TestContext::new().await;

        for target in [ctx.customer.id, UserId::from_i64(8_080)] {
            let result = ctx
                .reviews
                .create_review(Some(ctx.customer_principal()), review_of(target, 4))
                .await;

            assert!(
                matches!(
                    result,
                    Err(ReviewsServiceError::Validation(
                        ValidationError::NotABusinessUser
                    ))
                ),
                "expected NotABusinessUser, got {result:?}"
            );
        }
    }

    #[tokio::test]
    async fn out_of_range_rating_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx
            .reviews
            .create_review(
                Some(ctx.customer_principal()),
                review_of(ctx.business.id, 0),
            )
            .await;

        assert!(
            matches!(
                result,
                Err(ReviewsServiceError::Validation(
                    ValidationError::RatingOutOfRange
                ))
            ),
            "expected RatingOutOfRange, got {result:?}"
        );
    }

    #[tokio::test]
    async fn business_cannot_create_reviews() {
        let ctx = TestContext::new().await;

        let result = ctx
            .reviews
            .create_review(
                Some(ctx.other_business_principal()),
                review_of(ctx.business.id, 4),
            )
            .await;

        assert!(
            matches!(
                result,
                Err(ReviewsServiceError::Policy(PolicyError::Forbidden))
            ),
            "expected Forbidden, got {result:?}"
        );
    }

    #[tokio::test]
    async fn invalid_rating_update_leaves_review_unchanged() -> TestResult {
        let ctx = TestContext::new().await;

        let review = ctx
            .reviews
            .create_review(
                Some(ctx.customer_principal()),
                review_of(ctx.business.id, 4),
            )
            .await?;

        let result = ctx
            .reviews
            .update_review(
                Some(ctx.customer_principal()),
                review.id,
                ReviewUpdate {
                    rating: Some(6),
                    description: None,
                },
            )
            .await;

        assert!(
            matches!(
                result,
                Err(ReviewsServiceError::Validation(
                    ValidationError::RatingOutOfRange
                ))
            ),
            "expected RatingOutOfRange, got {result:?}"
        );

        let stored = ctx
            .reviews
            .list_reviews(Some(ctx.customer_principal()), ReviewQuery::default())
            .await?;

        assert_eq!(stored.first().map(|r| r.rating), Some(4));

        Ok(())
    }

    #[tokio::test]
    async fn reviewer_updates_rating_and_description() -> TestResult {
        let ctx = TestContext::new().await;

        let review = ctx
            .reviews
            .create_review(
                Some(ctx.customer_principal()),
                review_of(ctx.business.id, 4),
            )
            .await?;

        let updated = ctx
            .reviews
            .update_review(
                Some(ctx.customer_principal()),
                review.id,
                ReviewUpdate {
                    rating: Some(5),
                    description: Some("Noch besser als erwartet".to_string()),
                },
            )
            .await?;

        assert_eq!(updated.rating, 5);
        assert_eq!(updated.description, "Noch besser als erwartet");
        assert_eq!(updated.business_user, ctx.business.id);
        assert_eq!(updated.reviewer, ctx.customer.id);

        Ok(())
    }

    #[tokio::test]
    async fn reviewed_business_cannot_update_or_delete_review() -> TestResult {
        let ctx = TestContext::new().await;

        let review = ctx
            .reviews
            .create_review(
                Some(ctx.customer_principal()),
                review_of(ctx.business.id, 2),
            )
            .await?;

        let update = ctx
            .reviews
            .update_review(
                Some(ctx.business_principal()),
                review.id,
                ReviewUpdate {
                    rating: Some(9),
                    description: None,
                },
            )
            .await;

        assert!(
            matches!(
                update,
                Err(ReviewsServiceError::Policy(PolicyError::Forbidden))
            ),
            "expected Forbidden, got {update:?}"
        );

        let delete = ctx
            .reviews
            .delete_review(Some(ctx.business_principal()), review.id)
            .await;

        assert!(
            matches!(
                delete,
                Err(ReviewsServiceError::Policy(PolicyError::Forbidden))
            ),
            "expected Forbidden, got {delete:?}"
        );
        assert_eq!(count_rows(&ctx, "reviews").await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn reviewer_deletes_own_review() -> TestResult {
        let ctx = TestContext::new().await;

        let review = ctx
            .reviews
            .create_review(
                Some(ctx.customer_principal()),
                review_of(ctx.business.id, 3),
            )
            .await?;

        ctx.reviews
            .delete_review(Some(ctx.customer_principal()), review.id)
            .await?;

        assert_eq!(count_rows(&ctx, "reviews").await?, 0);

        let again = ctx
            .reviews
            .delete_review(Some(ctx.customer_principal()), review.id)
            .await;

        assert!(
            matches!(again, Err(ReviewsServiceError::NotFound)),
            "expected NotFound, got {again:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_filters_and_orders_reviews() -> TestResult {
        let ctx = TestContext::new().await;

        let low = ctx
            .reviews
            .create_review(
                Some(ctx.customer_principal()),
                review_of(ctx.business.id, 2),
            )
            .await?;

        let high = ctx
            .reviews
            .create_review(
                Some(ctx.customer_principal()),
                review_of(ctx.other_business.id, 5),
            )
            .await?;

        let caller = Some(ctx.business_principal());

        let for_business = ctx
            .reviews
            .list_reviews(
                caller,
                ReviewQuery {
                    business_user_id: Some(ctx.business.id),
                    ..ReviewQuery::default()
                },
            )
            .await?;

        assert_eq!(for_business, vec![low.clone()]);

        let both_filters = ctx
            .reviews
            .list_reviews(
                caller,
                ReviewQuery {
                    business_user_id: Some(ctx.other_business.id),
                    reviewer_id: Some(ctx.customer.id),
                    ordering: None,
                },
            )
            .await?;

        assert_eq!(both_filters, vec![high.clone()]);

        let by_rating = ctx
            .reviews
            .list_reviews(
                caller,
                ReviewQuery {
                    ordering: Some(ReviewOrdering::RatingDesc),
                    ..ReviewQuery::default()
                },
            )
            .await?;

        assert_eq!(by_rating, vec![high, low]);

        Ok(())
    }

    #[tokio::test]
    async fn listing_reviews_requires_authentication() {
        let ctx = TestContext::new().await;

        let result = ctx.reviews.list_reviews(None, ReviewQuery::default()).await;

        assert!(
            matches!(
                result,
                Err(ReviewsServiceError::Policy(
                    PolicyError::AuthenticationRequired
                ))
            ),
            "expected AuthenticationRequired, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_preflight_admits_only_the_reviewer() -> TestResult {
        let ctx = TestContext::new().await;

        let review = ctx
            .reviews
            .create_review(
                Some(ctx.customer_principal()),
                review_of(ctx.business.id, 3),
            )
            .await?;

        ctx.reviews
            .authorize_review_update(Some(ctx.customer_principal()), review.id)
            .await?;

        for principal in [ctx.business_principal(), ctx.second_customer_principal()] {
            let result = ctx
                .reviews
                .authorize_review_update(Some(principal), review.id)
                .await;

            assert!(
                matches!(
                    result,
                    Err(ReviewsServiceError::Policy(PolicyError::Forbidden))
                ),
                "expected Forbidden, got {result:?}"
            );
        }

        let missing = ctx
            .reviews
            .authorize_review_update(Some(ctx.customer_principal()), ReviewId::from_i64(9_999))
            .await;

        assert!(
            matches!(missing, Err(ReviewsServiceError::NotFound)),
            "expected NotFound, got {missing:?}"
        );

        Ok(())
    }
}
