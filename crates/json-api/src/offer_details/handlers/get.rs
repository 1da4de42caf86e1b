//! Get Offer Detail Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use marketplace_app::domain::offers::records::OfferDetailId;

use crate::{
    extensions::*,
    offers::{
        errors::into_status_error,
        schemas::{OfferDetailResponse, absolute_detail_link},
    },
    state::State,
};

/// Get Offer Detail Handler
#[endpoint(
    tags("offer details"),
    summary = "Get Offer Detail",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Offer detail"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::NOT_FOUND, description = "Offer detail not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<OfferDetailResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let detail = state
        .app
        .offers
        .get_offer_detail(depot.principal(), OfferDetailId::from_i64(id.into_inner()))
        .await
        .map_err(into_status_error)?;

    let url = absolute_detail_link(&req.base_url(), detail.id);

    Ok(Json(OfferDetailResponse::new(detail, url)))
}

#[cfg(test)]
mod tests {
    use marketplace_app::domain::offers::{MockOffersService, OffersServiceError};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{CUSTOMER, offer_fixture, offers_service};

    use super::*;

    fn make_service(offers: MockOffersService) -> Service {
        offers_service(
            offers,
            Some(CUSTOMER),
            Router::with_path("offerdetails/{id}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_returns_tier_body() -> TestResult {
        let mut offers = MockOffersService::new();

        let detail = offer_fixture(1)
            .details
            .into_iter()
            .last()
            .ok_or("missing tier")?;

        offers
            .expect_get_offer_detail()
            .once()
            .withf(|_, detail| detail.into_i64() == 13)
            .return_once(move |_, _| Ok(detail));

        let mut res = TestClient::get("http://example.com/offerdetails/13")
            .send(&make_service(offers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OfferDetailResponse = res.take_json().await?;

        assert_eq!(body.id, 13);
        assert_eq!(body.offer_type, "premium");
        assert_eq!(body.url, "http://example.com/api/offerdetails/13/");

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_detail_returns_404() -> TestResult {
        let mut offers = MockOffersService::new();

        offers
            .expect_get_offer_detail()
            .once()
            .return_once(|_, _| Err(OffersServiceError::NotFound));

        let res = TestClient::get("http://example.com/offerdetails/99")
            .send(&make_service(offers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
