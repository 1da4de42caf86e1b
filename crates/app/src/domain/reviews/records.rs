//! Review Records

use jiff::Timestamp;

use crate::{domain::users::records::UserId, ids::TypedId};

/// Review ID
pub type ReviewId = TypedId<Review>;

/// A customer's review of a business user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: ReviewId,
    pub business_user: UserId,
    pub reviewer: UserId,
    pub rating: i32,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
