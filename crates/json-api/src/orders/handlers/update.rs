//! Update Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use marketplace_app::{
    domain::orders::records::OrderId,
    policy::{self, Operation, Resource},
};

use crate::{
    errors::policy_status_error,
    extensions::*,
    orders::{
        errors::into_status_error,
        schemas::{OrderResponse, UpdateOrderRequest},
    },
    state::State,
};

/// Update Order Handler
///
/// Changes the status of an order. Only the order's business user may do
/// this; everyone else is refused before the status is looked at.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    request_body = UpdateOrderRequest,
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller is not the order's business user"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
#[tracing::instrument(name = "orders.update", skip(id, req, depot), err)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal();

    policy::check(principal.as_ref(), Resource::Orders, Operation::Update)
        .map_err(policy_status_error)?;

    let body = req.untyped_json_body().await?;
    let order = OrderId::from_i64(id.into_inner());

    state
        .app
        .orders
        .authorize_order_update(principal, order)
        .await
        .map_err(into_status_error)?;

    let request: UpdateOrderRequest = body.decode()?;

    let order = state
        .app
        .orders
        .update_order_status(principal, order, request.status.unwrap_or_default())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
