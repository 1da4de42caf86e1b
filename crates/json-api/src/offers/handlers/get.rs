//! Get Offer Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use marketplace_app::domain::offers::records::OfferId;

use crate::{
    extensions::*,
    offers::{
        errors::into_status_error,
        schemas::{OfferSummaryResponse, absolute_detail_link},
    },
    state::State,
};

/// Get Offer Handler
///
/// Returns a single offer with absolute links to its tiers.
#[endpoint(
    tags("offers"),
    summary = "Get Offer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Offer"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::NOT_FOUND, description = "Offer not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<OfferSummaryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let offer = state
        .app
        .offers
        .get_offer(depot.principal(), OfferId::from_i64(id.into_inner()))
        .await
        .map_err(into_status_error)?;

    let base_url = req.base_url();

    Ok(Json(OfferSummaryResponse::new(offer, |detail| {
        absolute_detail_link(&base_url, detail)
    })))
}
