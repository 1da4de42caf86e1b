//! Reviews Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use marketplace_app::domain::{
    reviews::data::{ReviewOrdering, ReviewQuery},
    users::records::UserId,
};

use crate::{
    extensions::*,
    reviews::{errors::into_status_error, schemas::ReviewResponse},
    state::State,
};

/// Reviews Index Handler
///
/// Filters are AND-combined. `ordering` accepts `rating` or `updated_at`,
/// optionally prefixed with `-`.
#[endpoint(
    tags("reviews"),
    summary = "List Reviews",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Matching reviews"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed filter"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
    ),
)]
pub(crate) async fn handler(
    business_user_id: QueryParam<i64, false>,
    reviewer_id: QueryParam<i64, false>,
    ordering: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<ReviewResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let query = ReviewQuery {
        business_user_id: business_user_id.into_inner().map(UserId::from_i64),
        reviewer_id: reviewer_id.into_inner().map(UserId::from_i64),
        ordering: ordering.into_inner().as_deref().and_then(ReviewOrdering::parse),
    };

    let reviews = state
        .app
        .reviews
        .list_reviews(depot.principal(), query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use marketplace_app::{domain::reviews::MockReviewsService, policy::PolicyError};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{BUSINESS, CUSTOMER, review_fixture, reviews_service};

    use super::*;

    #[tokio::test]
    async fn test_filters_are_forwarded() -> TestResult {
        let mut reviews = MockReviewsService::new();

        reviews
            .expect_list_reviews()
            .once()
            .withf(|_, query| {
                *query
                    == ReviewQuery {
                        business_user_id: Some(BUSINESS.id),
                        reviewer_id: Some(CUSTOMER.id),
                        ordering: Some(ReviewOrdering::RatingDesc),
                    }
            })
            .return_once(|_, _| Ok(vec![review_fixture(1, 5), review_fixture(2, 3)]));

        let service = reviews_service(
            reviews,
            Some(CUSTOMER),
            Router::with_path("reviews").get(handler),
        );

        let mut res = TestClient::get(format!(
            "http://example.com/reviews?business_user_id={}&reviewer_id={}&ordering=-rating",
            BUSINESS.id, CUSTOMER.id
        ))
        .send(&service)
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Vec<ReviewResponse> = res.take_json().await?;

        assert_eq!(
            body.iter().map(|review| review.rating).collect::<Vec<_>>(),
            vec![5, 3]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_anonymous_list_returns_401() -> TestResult {
        let mut reviews = MockReviewsService::new();

        reviews
            .expect_list_reviews()
            .once()
            .return_once(|_, _| Err(PolicyError::AuthenticationRequired.into()));

        let service = reviews_service(reviews, None, Router::with_path("reviews").get(handler));

        let res = TestClient::get("http://example.com/reviews")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_filter_returns_400() -> TestResult {
        let mut reviews = MockReviewsService::new();

        reviews.expect_list_reviews().never();

        let service = reviews_service(
            reviews,
            Some(CUSTOMER),
            Router::with_path("reviews").get(handler),
        );

        let res = TestClient::get("http://example.com/reviews?business_user_id=abc")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
