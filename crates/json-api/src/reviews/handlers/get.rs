//! Get Review Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use marketplace_app::policy::{self, Operation, Resource};

use crate::{errors::policy_status_error, extensions::*};

/// Get Review Handler
///
/// Single reviews are not readable; callers filter the listing instead.
#[endpoint(
    tags("reviews"),
    summary = "Get Review",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::METHOD_NOT_ALLOWED, description = "Not available"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    policy::check(depot.principal().as_ref(), Resource::Reviews, Operation::Retrieve)
        .map_err(policy_status_error)?;

    tracing::debug!(review_id = id.into_inner(), "refusing single review read");

    Err(StatusError::method_not_allowed()
        .brief("Detail queries are not available. Use the filter options."))
}
