//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use marketplace_app::{
    auth::{MockAuthService, Principal},
    context::AppContext,
    domain::{
        offers::{
            MockOffersService,
            records::{Offer, OfferDetailId, OfferDetailRecord, OfferId, OfferRecord, OfferType},
        },
        orders::{
            MockOrdersService,
            records::{Order, OrderId, OrderStatus},
        },
        reviews::{
            MockReviewsService,
            records::{Review, ReviewId},
        },
        stats::MockStatsService,
        users::records::{Role, UserId, UserSummary},
    },
};
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use crate::{extensions::*, state::State};

const fn principal(id: i64, role: Role, is_staff: bool) -> Principal {
    Principal {
        id: UserId::from_i64(id),
        role,
        is_staff,
        is_superuser: false,
    }
}

pub(crate) const BUSINESS: Principal = principal(1, Role::Business, false);
pub(crate) const OTHER_BUSINESS: Principal = principal(2, Role::Business, false);
pub(crate) const CUSTOMER: Principal = principal(3, Role::Customer, false);
pub(crate) const STAFF: Principal = principal(4, Role::Customer, true);

/// Hoop standing in for the auth middleware.
#[derive(Debug, Clone, Copy)]
struct InjectPrincipal(Option<Principal>);

#[salvo::handler]
impl InjectPrincipal {
    async fn handle(&self, depot: &mut Depot) {
        if let Some(principal) = self.0 {
            depot.insert_principal(principal);
        }
    }
}

fn strict_offers_mock() -> MockOffersService {
    let mut offers = MockOffersService::new();

    offers.expect_list_offers().never();
    offers.expect_get_offer().never();
    offers.expect_create_offer().never();
    offers.expect_authorize_offer_update().never();
    offers.expect_update_offer().never();
    offers.expect_delete_offer().never();
    offers.expect_get_offer_detail().never();
    offers.expect_authorize_offer_detail_update().never();
    offers.expect_update_offer_detail().never();

    offers
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_list_orders().never();
    orders.expect_create_order().never();
    orders.expect_authorize_order_update().never();
    orders.expect_update_order_status().never();
    orders.expect_delete_order().never();
    orders.expect_order_count().never();
    orders.expect_completed_order_count().never();

    orders
}

fn strict_reviews_mock() -> MockReviewsService {
    let mut reviews = MockReviewsService::new();

    reviews.expect_list_reviews().never();
    reviews.expect_create_review().never();
    reviews.expect_authorize_review_update().never();
    reviews.expect_update_review().never();
    reviews.expect_delete_review().never();

    reviews
}

fn strict_stats_mock() -> MockStatsService {
    let mut stats = MockStatsService::new();

    stats.expect_base_info().never();

    stats
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_token().never();

    auth
}

fn strict_context() -> AppContext {
    AppContext {
        offers: Arc::new(strict_offers_mock()),
        orders: Arc::new(strict_orders_mock()),
        reviews: Arc::new(strict_reviews_mock()),
        stats: Arc::new(strict_stats_mock()),
        auth: Arc::new(strict_auth_mock()),
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        auth: Arc::new(auth),
        ..strict_context()
    }))
}

fn service(state: Arc<State>, principal: Option<Principal>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(InjectPrincipal(principal))
            .push(route),
    )
}

pub(crate) fn offers_service(
    offers: MockOffersService,
    principal: Option<Principal>,
    route: Router,
) -> Service {
    let state = State::new(AppContext {
        offers: Arc::new(offers),
        ..strict_context()
    });

    service(Arc::new(state), principal, route)
}

pub(crate) fn orders_service(
    orders: MockOrdersService,
    principal: Option<Principal>,
    route: Router,
) -> Service {
    let state = State::new(AppContext {
        orders: Arc::new(orders),
        ..strict_context()
    });

    service(Arc::new(state), principal, route)
}

pub(crate) fn reviews_service(
    reviews: MockReviewsService,
    principal: Option<Principal>,
    route: Router,
) -> Service {
    let state = State::new(AppContext {
        reviews: Arc::new(reviews),
        ..strict_context()
    });

    service(Arc::new(state), principal, route)
}

pub(crate) fn stats_service(stats: MockStatsService, route: Router) -> Service {
    let state = State::new(AppContext {
        stats: Arc::new(stats),
        ..strict_context()
    });

    service(Arc::new(state), None, route)
}

/// Offer owned by [`BUSINESS`] whose tiers get ids `id * 10 + 1..=3`.
pub(crate) fn offer_fixture(id: i64) -> Offer {
    let offer_id = OfferId::from_i64(id);

    let details = OfferType::ALL
        .into_iter()
        .zip(1_i64..)
        .map(|(offer_type, step)| OfferDetailRecord {
            id: OfferDetailId::from_i64(id * 10 + step),
            offer_id,
            title: format!("{offer_type} package"),
            revisions: i32::try_from(step).unwrap_or_default(),
            delivery_time_in_days: i32::try_from(step * 2).unwrap_or_default(),
            price: Decimal::new(step * 10_000, 2),
            offer_type,
            features: vec!["Logo".to_string()],
        })
        .collect();

    Offer::new(
        OfferRecord {
            id: offer_id,
            user_id: BUSINESS.id,
            title: "Website design".to_string(),
            image: None,
            description: "Responsive sites".to_string(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            owner: UserSummary {
                first_name: "Bea".to_string(),
                last_name: "Business".to_string(),
                username: "bea".to_string(),
            },
        },
        details,
    )
}

/// In-progress order placed by [`CUSTOMER`] with [`BUSINESS`].
pub(crate) fn order_fixture(id: i64) -> Order {
    Order {
        id: OrderId::from_i64(id),
        offer_detail_id: OfferDetailId::from_i64(11),
        business_user: BUSINESS.id,
        customer_user: Some(CUSTOMER.id),
        status: OrderStatus::InProgress,
        title: "basic package".to_string(),
        revisions: 1,
        delivery_time_in_days: 2,
        price: Decimal::new(10_000, 2),
        features: vec!["Logo".to_string()],
        offer_type: OfferType::Basic,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// Review written by [`CUSTOMER`] about [`BUSINESS`].
pub(crate) fn review_fixture(id: i64, rating: i32) -> Review {
    Review {
        id: ReviewId::from_i64(id),
        business_user: BUSINESS.id,
        reviewer: CUSTOMER.id,
        rating,
        description: "Great work".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
