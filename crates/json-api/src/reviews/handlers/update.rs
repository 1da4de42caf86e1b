//! Update Review Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use marketplace_app::{
    domain::reviews::records::ReviewId,
    policy::{self, Operation, Resource},
};

use crate::{
    errors::policy_status_error,
    extensions::*,
    reviews::{
        errors::into_status_error,
        schemas::{ReviewResponse, UpdateReviewRequest},
    },
    state::State,
};

/// Update Review Handler
///
/// Changes rating and/or description. Only the reviewer may do this.
#[endpoint(
    tags("reviews"),
    summary = "Update Review",
    security(("bearer_auth" = [])),
    request_body = UpdateReviewRequest,
    responses(
        (status_code = StatusCode::OK, description = "Review updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid review payload"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller is not the reviewer"),
        (status_code = StatusCode::NOT_FOUND, description = "Review not found"),
    ),
)]
#[tracing::instrument(name = "reviews.update", skip(id, req, depot), err)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ReviewResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal();

    policy::check(principal.as_ref(), Resource::Reviews, Operation::Update)
        .map_err(policy_status_error)?;

    let body = req.untyped_json_body().await?;
    let review = ReviewId::from_i64(id.into_inner());

    state
        .app
        .reviews
        .authorize_review_update(principal, review)
        .await
        .map_err(into_status_error)?;

    let request: UpdateReviewRequest = body.decode()?;

    let review = state
        .app
        .reviews
        .update_review(principal, review, request.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(review.into()))
}
