//! Update Offer Detail Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use marketplace_app::{
    domain::offers::records::OfferDetailId,
    policy::{self, Operation, Resource},
};

use crate::{
    errors::policy_status_error,
    extensions::*,
    offers::{
        errors::into_status_error,
        schemas::{OfferDetailResponse, UpdateOfferDetailRequest, absolute_detail_link},
    },
    state::State,
};

/// Update Offer Detail Handler
///
/// Partially updates a tier. `offer_type` is ignored if sent.
#[endpoint(
    tags("offer details"),
    summary = "Update Offer Detail",
    security(("bearer_auth" = [])),
    request_body = UpdateOfferDetailRequest,
    responses(
        (status_code = StatusCode::OK, description = "Offer detail updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid offer detail payload"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::NOT_FOUND, description = "Offer detail not found"),
    ),
)]
#[tracing::instrument(name = "offer_details.update", skip(id, req, depot), err)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<OfferDetailResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal();

    policy::check(
        principal.as_ref(),
        Resource::OfferDetails,
        Operation::Update,
    )
    .map_err(policy_status_error)?;

    let body = req.untyped_json_body().await?;
    let detail = OfferDetailId::from_i64(id.into_inner());

    state
        .app
        .offers
        .authorize_offer_detail_update(principal, detail)
        .await
        .map_err(into_status_error)?;

    let request: UpdateOfferDetailRequest = body.decode()?;

    let detail = state
        .app
        .offers
        .update_offer_detail(principal, detail, request.into())
        .await
        .map_err(into_status_error)?;

    let url = absolute_detail_link(&req.base_url(), detail.id);

    Ok(Json(OfferDetailResponse::new(detail, url)))
}
