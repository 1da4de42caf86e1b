//! Create Review Handler

use std::sync::Arc;

use salvo::prelude::*;

use marketplace_app::policy::{self, Operation, Resource};

use crate::{
    errors::policy_status_error,
    extensions::*,
    reviews::{
        errors::into_status_error,
        schemas::{CreateReviewRequest, ReviewResponse},
    },
    state::State,
};

/// Create Review Handler
///
/// Records the calling customer's review of a business user. Each customer
/// may review a business user once.
#[endpoint(
    tags("reviews"),
    summary = "Create Review",
    security(("bearer_auth" = [])),
    request_body = CreateReviewRequest,
    responses(
        (status_code = StatusCode::CREATED, description = "Review created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid review payload"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller is not a customer or already reviewed"),
    ),
)]
#[tracing::instrument(
    name = "reviews.create",
    skip(req, depot, res),
    fields(review_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReviewResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal();

    policy::check(principal.as_ref(), Resource::Reviews, Operation::Create)
        .map_err(policy_status_error)?;

    let request: CreateReviewRequest = req.json_body().await?;

    let review = state
        .app
        .reviews
        .create_review(principal, request.into())
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("review_id", review.id.into_i64());

    res.status_code(StatusCode::CREATED);

    Ok(Json(review.into()))
}
