//! Review request and response schemas.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use marketplace_app::domain::{
    reviews::{
        data::{NewReview, ReviewUpdate},
        records::Review,
    },
    users::records::UserId,
};

/// Create Review Request
///
/// The reviewer is always the caller; a `reviewer` field is ignored.
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CreateReviewRequest {
    /// Business user being reviewed
    pub business_user: i64,
    /// 1 to 5
    pub rating: i32,
    #[serde(default)]
    pub description: String,
}

impl From<CreateReviewRequest> for NewReview {
    fn from(request: CreateReviewRequest) -> Self {
        NewReview {
            business_user: UserId::from_i64(request.business_user),
            rating: request.rating,
            description: request.description,
        }
    }
}

/// Update Review Request
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct UpdateReviewRequest {
    pub rating: Option<i32>,
    pub description: Option<String>,
}

impl From<UpdateReviewRequest> for ReviewUpdate {
    fn from(request: UpdateReviewRequest) -> Self {
        ReviewUpdate {
            rating: request.rating,
            description: request.description,
        }
    }
}

/// Review Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewResponse {
    pub id: i64,
    pub business_user: i64,
    pub reviewer: i64,
    pub rating: i32,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        ReviewResponse {
            id: review.id.into_i64(),
            business_user: review.business_user.into_i64(),
            reviewer: review.reviewer.into_i64(),
            rating: review.rating,
            description: review.description,
            created_at: review.created_at.to_string(),
            updated_at: review.updated_at.to_string(),
        }
    }
}
