//! Update Offer Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use marketplace_app::{
    domain::offers::records::OfferId,
    policy::{self, Operation, Resource},
};

use crate::{
    errors::policy_status_error,
    extensions::*,
    offers::{
        errors::into_status_error,
        schemas::{OfferResponse, UpdateOfferRequest, absolute_detail_link},
    },
    state::State,
};

/// Update Offer Handler
///
/// Partially updates an offer. Nested tiers are matched by `offer_type`.
#[endpoint(
    tags("offers"),
    summary = "Update Offer",
    security(("bearer_auth" = [])),
    request_body = UpdateOfferRequest,
    responses(
        (status_code = StatusCode::OK, description = "Offer updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid offer payload"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller does not own the offer"),
        (status_code = StatusCode::NOT_FOUND, description = "Offer not found"),
    ),
)]
#[tracing::instrument(
    name = "offers.update",
    skip(id, req, depot),
    fields(offer_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<OfferResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal();
    let offer = OfferId::from_i64(id.into_inner());

    tracing::Span::current().record("offer_id", offer.into_i64());

    policy::check(principal.as_ref(), Resource::Offers, Operation::Update)
        .map_err(policy_status_error)?;

    let body = req.untyped_json_body().await?;

    state
        .app
        .offers
        .authorize_offer_update(principal, offer)
        .await
        .map_err(into_status_error)?;

    let request: UpdateOfferRequest = body.decode()?;

    let offer = state
        .app
        .offers
        .update_offer(principal, offer, request.into())
        .await
        .map_err(into_status_error)?;

    let base_url = req.base_url();

    Ok(Json(OfferResponse::new(offer, |detail| {
        absolute_detail_link(&base_url, detail)
    })))
}
