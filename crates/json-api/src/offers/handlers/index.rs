//! Offers Index Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{oapi::extract::QueryParam, prelude::*};

use marketplace_app::domain::{
    offers::data::{OfferOrdering, OfferQuery},
    pagination::PageRequest,
    users::records::UserId,
};

use crate::{
    errors::invalid_page,
    extensions::*,
    offers::{errors::into_status_error, schemas::OfferPageResponse},
    state::State,
};

/// Offers Index Handler
///
/// Lists offers one page at a time. Open to anonymous callers.
#[endpoint(
    tags("offers"),
    summary = "List Offers",
    responses(
        (status_code = StatusCode::OK, description = "One page of offers"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed filter"),
        (status_code = StatusCode::NOT_FOUND, description = "Invalid page"),
    ),
)]
#[expect(
    clippy::too_many_arguments,
    reason = "each query parameter is a separate extractor"
)]
pub(crate) async fn handler(
    creator_id: QueryParam<i64, false>,
    min_price: QueryParam<String, false>,
    max_delivery_time: QueryParam<i32, false>,
    search: QueryParam<String, false>,
    ordering: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    page_size: QueryParam<u32, false>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<OfferPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let page = PageRequest::new(page.into_inner(), page_size.into_inner()).ok_or_else(invalid_page)?;

    let min_price = min_price
        .into_inner()
        .map(|raw| raw.trim().parse::<Decimal>())
        .transpose()
        .or_400("min_price must be a number.")?;

    let query = OfferQuery {
        creator_id: creator_id.into_inner().map(UserId::from_i64),
        min_price,
        max_delivery_time: max_delivery_time.into_inner(),
        search: search.into_inner(),
        ordering: ordering.into_inner().as_deref().and_then(OfferOrdering::parse),
        page,
    };

    let offers = state
        .app
        .offers
        .list_offers(depot.principal(), query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OfferPageResponse::new(offers, req)))
}
