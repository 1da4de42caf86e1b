//! Delete Offer Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use marketplace_app::domain::offers::records::OfferId;

use crate::{extensions::*, offers::errors::into_status_error, state::State};

/// Delete Offer Handler
///
/// Deletes an offer together with its tiers and the orders placed on them.
#[endpoint(
    tags("offers"),
    summary = "Delete Offer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Offer deleted"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller does not own the offer"),
        (status_code = StatusCode::NOT_FOUND, description = "Offer not found"),
    ),
)]
#[tracing::instrument(name = "offers.delete", skip(id, depot), err)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .offers
        .delete_offer(depot.principal(), OfferId::from_i64(id.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use marketplace_app::{auth::Principal, domain::offers::MockOffersService, policy::PolicyError};
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{BUSINESS, CUSTOMER, offers_service};

    use super::*;

    fn make_service(offers: MockOffersService, principal: Principal) -> Service {
        offers_service(
            offers,
            Some(principal),
            Router::with_path("offers/{id}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_owner_deletes_offer() -> TestResult {
        let mut offers = MockOffersService::new();

        offers
            .expect_delete_offer()
            .once()
            .withf(|principal, offer| *principal == Some(BUSINESS) && offer.into_i64() == 5)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete("http://example.com/offers/5")
            .send(&make_service(offers, BUSINESS))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_delete_returns_403() -> TestResult {
        let mut offers = MockOffersService::new();

        offers
            .expect_delete_offer()
            .once()
            .return_once(|_, _| Err(PolicyError::Forbidden.into()));

        let res = TestClient::delete("http://example.com/offers/5")
            .send(&make_service(offers, CUSTOMER))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
