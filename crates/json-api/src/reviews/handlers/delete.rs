//! Delete Review Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use marketplace_app::domain::reviews::records::ReviewId;

use crate::{extensions::*, reviews::errors::into_status_error, state::State};

/// Delete Review Handler
#[endpoint(
    tags("reviews"),
    summary = "Delete Review",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Review deleted"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller is not the reviewer"),
        (status_code = StatusCode::NOT_FOUND, description = "Review not found"),
    ),
)]
#[tracing::instrument(name = "reviews.delete", skip(id, depot), err)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .reviews
        .delete_review(depot.principal(), ReviewId::from_i64(id.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
