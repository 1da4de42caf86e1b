//! Create Order Handler

use std::sync::Arc;

use salvo::prelude::*;

use marketplace_app::{
    domain::offers::records::OfferDetailId,
    policy::{self, Operation, Resource},
};

use crate::{
    errors::policy_status_error,
    extensions::*,
    orders::{
        errors::into_status_error,
        schemas::{CreateOrderRequest, OrderResponse},
    },
    state::State,
};

/// Create Order Handler
///
/// Places an order for a tier. The offer's owner becomes the business user
/// and the caller the customer.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    request_body = CreateOrderRequest,
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed offer_detail_id"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller is not a customer"),
        (status_code = StatusCode::NOT_FOUND, description = "Offer detail not found"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(req, depot, res),
    fields(order_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal();

    policy::check(principal.as_ref(), Resource::Orders, Operation::Create)
        .map_err(policy_status_error)?;

    let request: CreateOrderRequest = req.json_body().await?;

    let order = state
        .app
        .orders
        .create_order(principal, OfferDetailId::from_i64(request.offer_detail_id))
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("order_id", order.id.into_i64());

    res.status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
