//! Get Order Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use marketplace_app::policy::{self, Operation, Resource};

use crate::{errors::policy_status_error, extensions::*};

/// Get Order Handler
///
/// Single orders are not readable; callers list orders instead.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
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
    policy::check(depot.principal().as_ref(), Resource::Orders, Operation::Retrieve)
        .map_err(policy_status_error)?;

    Err(StatusError::method_not_allowed()
        .brief("Method \"GET\" not allowed.")
        .detail(format!("order {} cannot be read on its own", id.into_inner())))
}
