//! API Router

use salvo::Router;

use crate::{auth, offer_details, offers, orders, reviews, stats};

/// Every `/api` route, behind the auth middleware.
pub(crate) fn api_router() -> Router {
    Router::with_path("api")
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("offers")
                .get(offers::index::handler)
                .post(offers::create::handler)
                .push(
                    Router::with_path("{id}")
                        .get(offers::get::handler)
                        .patch(offers::update::handler)
                        .delete(offers::delete::handler),
                ),
        )
        .push(
            Router::with_path("offerdetails")
                .get(offer_details::index::handler)
                .push(
                    Router::with_path("{id}")
                        .get(offer_details::get::handler)
                        .patch(offer_details::update::handler),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(
                    Router::with_path("{id}")
                        .get(orders::get::handler)
                        .patch(orders::update::handler)
                        .delete(orders::delete::handler),
                ),
        )
        .push(Router::with_path("order-count/{business_user_id}").get(orders::count::handler))
        .push(
            Router::with_path("completed-order-count/{business_user_id}")
                .get(orders::completed_count::handler),
        )
        .push(
            Router::with_path("reviews")
                .get(reviews::index::handler)
                .post(reviews::create::handler)
                .push(
                    Router::with_path("{id}")
                        .get(reviews::get::handler)
                        .patch(reviews::update::handler)
                        .delete(reviews::delete::handler),
                ),
        )
        .push(Router::with_path("base-info").get(stats::base_info::handler))
}
