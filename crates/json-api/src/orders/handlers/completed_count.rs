//! Completed Order Count Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use marketplace_app::domain::users::records::UserId;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, schemas::CompletedOrderCountResponse},
    state::State,
};

/// Completed Order Count Handler
#[endpoint(
    tags("orders"),
    summary = "Completed Order Count",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Completed order count"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::NOT_FOUND, description = "Business user not found"),
    ),
)]
pub(crate) async fn handler(
    business_user_id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<CompletedOrderCountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let completed_order_count = state
        .app
        .orders
        .completed_order_count(
            depot.principal(),
            UserId::from_i64(business_user_id.into_inner()),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(CompletedOrderCountResponse {
        completed_order_count,
    }))
}
