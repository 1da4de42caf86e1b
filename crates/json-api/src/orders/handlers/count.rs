//! Order Count Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use marketplace_app::domain::users::records::UserId;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, schemas::OrderCountResponse},
    state::State,
};

/// Order Count Handler
///
/// Number of orders placed with a business user, in any status.
#[endpoint(
    tags("orders"),
    summary = "Order Count",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order count"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::NOT_FOUND, description = "Business user not found"),
    ),
)]
pub(crate) async fn handler(
    business_user_id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<OrderCountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order_count = state
        .app
        .orders
        .order_count(
            depot.principal(),
            UserId::from_i64(business_user_id.into_inner()),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrderCountResponse { order_count }))
}
