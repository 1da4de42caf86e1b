//! Create Offer Handler

use std::sync::Arc;

use salvo::prelude::*;

use marketplace_app::policy::{self, Operation, Resource};

use crate::{
    errors::policy_status_error,
    extensions::*,
    offers::{
        errors::into_status_error,
        schemas::{CreateOfferRequest, OfferResponse, absolute_detail_link},
    },
    state::State,
};

/// Create Offer Handler
///
/// Creates an offer with its three tiers for the calling business user.
#[endpoint(
    tags("offers"),
    summary = "Create Offer",
    security(("bearer_auth" = [])),
    request_body = CreateOfferRequest,
    responses(
        (status_code = StatusCode::CREATED, description = "Offer created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid offer payload"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller is not a business user"),
    ),
)]
#[tracing::instrument(
    name = "offers.create",
    skip(req, depot, res),
    fields(offer_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OfferResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal();

    policy::check(principal.as_ref(), Resource::Offers, Operation::Create)
        .map_err(policy_status_error)?;

    let request: CreateOfferRequest = req.json_body().await?;

    let offer = state
        .app
        .offers
        .create_offer(principal, request.into())
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("offer_id", offer.id().into_i64());

    res.status_code(StatusCode::CREATED);

    let base_url = req.base_url();

    Ok(Json(OfferResponse::new(offer, |detail| {
        absolute_detail_link(&base_url, detail)
    })))
}

#[cfg(test)]
mod tests {
    use marketplace_app::{
        auth::Principal,
        domain::{
            offers::{MockOffersService, OffersServiceError},
            validation::ValidationError,
        },
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use crate::test_helpers::{BUSINESS, CUSTOMER, offer_fixture, offers_service};

    use super::*;

    fn make_service(offers: MockOffersService, principal: Option<Principal>) -> Service {
        offers_service(offers, principal, Router::with_path("offers").post(handler))
    }

    fn tier(offer_type: &str, price: u32) -> Value {
        json!({
            "title": format!("{offer_type} package"),
            "revisions": 1,
            "delivery_time_in_days": 3,
            "price": price,
            "features": ["Logo"],
            "offer_type": offer_type,
        })
    }

    #[tokio::test]
    async fn test_business_creates_offer() -> TestResult {
        let mut offers = MockOffersService::new();

        offers
            .expect_create_offer()
            .once()
            .withf(|principal, offer| {
                *principal == Some(BUSINESS)
                    && offer.title == "Website design"
                    && offer.details.len() == 3
                    && offer.details.iter().any(|detail| detail.offer_type == "premium")
            })
            .return_once(|_, _| Ok(offer_fixture(1)));

        let mut res = TestClient::post("http://example.com/offers")
            .json(&json!({
                "title": "Website design",
                "description": "Responsive sites",
                "details": [tier("basic", 100), tier("standard", 200), tier("premium", 300)],
            }))
            .send(&make_service(offers, Some(BUSINESS)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: OfferResponse = res.take_json().await?;

        assert_eq!(body.id, 1);
        assert_eq!(body.details.len(), 3);
        assert!(
            body.details.iter().all(|detail| !detail.title.is_empty()),
            "expected full tier bodies"
        );
        assert_eq!(
            body.details.first().map(|detail| detail.url.as_str()),
            Some("http://example.com/api/offerdetails/11/")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_is_forbidden_before_payload_is_read() -> TestResult {
        let mut offers = MockOffersService::new();

        offers.expect_create_offer().never();

        let res = TestClient::post("http://example.com/offers")
            .json(&json!({ "title": 42 }))
            .send(&make_service(offers, Some(CUSTOMER)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_anonymous_create_returns_401() -> TestResult {
        let mut offers = MockOffersService::new();

        offers.expect_create_offer().never();

        let res = TestClient::post("http://example.com/offers")
            .json(&json!({}))
            .send(&make_service(offers, None))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_body_returns_400() -> TestResult {
        let mut offers = MockOffersService::new();

        offers.expect_create_offer().never();

        let res = TestClient::post("http://example.com/offers")
            .json(&json!({ "title": "No tiers" }))
            .send(&make_service(offers, Some(BUSINESS)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_wrong_tier_count_returns_400() -> TestResult {
        let mut offers = MockOffersService::new();

        offers
            .expect_create_offer()
            .once()
            .return_once(|_, _| Err(ValidationError::DetailCount(2).into()));

        let res = TestClient::post("http://example.com/offers")
            .json(&json!({
                "title": "Website design",
                "details": [tier("basic", 100), tier("standard", 200)],
            }))
            .send(&make_service(offers, Some(BUSINESS)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_tier_returns_400() -> TestResult {
        let mut offers = MockOffersService::new();

        offers
            .expect_create_offer()
            .once()
            .return_once(|_, _| Err(OffersServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/offers")
            .json(&json!({
                "title": "Website design",
                "details": [tier("basic", 100), tier("standard", 200), tier("premium", 300)],
            }))
            .send(&make_service(offers, Some(BUSINESS)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
