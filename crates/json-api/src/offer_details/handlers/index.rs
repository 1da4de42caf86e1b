//! Offer Details Index Handler

use salvo::prelude::*;

use marketplace_app::policy::{self, Operation, Resource};

use crate::{errors::policy_status_error, extensions::*};

/// Offer Details Index Handler
///
/// Tiers cannot be listed on their own; they are reached through their offer.
#[endpoint(
    tags("offer details"),
    summary = "List Offer Details",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::NOT_FOUND, description = "Listing is not available"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, StatusError> {
    policy::check(
        depot.principal().as_ref(),
        Resource::OfferDetails,
        Operation::List,
    )
    .map_err(policy_status_error)?;

    Err(StatusError::not_found().brief("Not found."))
}
