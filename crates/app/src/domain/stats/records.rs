//! Stats Records

use rust_decimal::Decimal;

/// Platform-wide counters shown on the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseInfo {
    pub review_count: u64,

    /// Mean review rating rounded to two decimals; zero without reviews.
    pub average_rating: Decimal,

    pub business_profile_count: u64,
    pub offer_count: u64,
}
