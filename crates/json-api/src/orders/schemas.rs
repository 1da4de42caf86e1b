//! Order request and response schemas.

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use marketplace_app::domain::{orders::records::Order, users::records::UserId};

/// Create Order Request
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    /// Tier being ordered
    pub offer_detail_id: i64,
}

/// Update Order Request
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderRequest {
    /// `in_progress`, `completed` or `cancelled`
    pub status: Option<String>,
}

/// Order with the current values of its tier
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub id: i64,
    /// Null once the customer account is gone
    pub customer_user: Option<i64>,
    pub business_user: i64,
    pub title: String,
    pub revisions: i32,
    pub delivery_time_in_days: i32,
    #[salvo(schema(value_type = f64))]
    pub price: Decimal,
    pub features: Vec<String>,
    pub offer_type: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            id: order.id.into_i64(),
            customer_user: order.customer_user.map(UserId::into_i64),
            business_user: order.business_user.into_i64(),
            title: order.title,
            revisions: order.revisions,
            delivery_time_in_days: order.delivery_time_in_days,
            price: order.price,
            features: order.features,
            offer_type: order.offer_type.to_string(),
            status: order.status.to_string(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Order Count Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderCountResponse {
    pub order_count: u64,
}

/// Completed Order Count Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CompletedOrderCountResponse {
    pub completed_order_count: u64,
}
