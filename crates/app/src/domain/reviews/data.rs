//! Reviews Data

use crate::domain::{
    users::records::UserId,
    validation::{ValidationError, limit_text},
};

pub const DESCRIPTION_MAX_CHARS: usize = 150;

/// New Review Data. The reviewer is always the caller and is not part of the
/// payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub business_user: UserId,
    pub rating: i32,
    pub description: String,
}

/// Fields a reviewer may change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewUpdate {
    pub rating: Option<i32>,
    pub description: Option<String>,
}

/// Sort keys accepted for review listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOrdering {
    Rating,
    RatingDesc,
    UpdatedAt,
    UpdatedAtDesc,
}

impl ReviewOrdering {
    /// Parse an `ordering` query value; the first recognised key wins and
    /// anything else falls back to the default order.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        raw.split(',').find_map(|key| match key.trim() {
            "rating" => Some(Self::Rating),
            "-rating" => Some(Self::RatingDesc),
            "updated_at" => Some(Self::UpdatedAt),
            "-updated_at" => Some(Self::UpdatedAtDesc),
            _ => None,
        })
    }

    #[must_use]
    pub const fn as_key(self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::RatingDesc => "-rating",
            Self::UpdatedAt => "updated_at",
            Self::UpdatedAtDesc => "-updated_at",
        }
    }
}

/// Review listing filters, AND-combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewQuery {
    pub business_user_id: Option<UserId>,
    pub reviewer_id: Option<UserId>,
    pub ordering: Option<ReviewOrdering>,
}

/// # Errors
///
/// Returns [`ValidationError::RatingOutOfRange`] outside 1..=5.
pub fn validate_rating(rating: i32) -> Result<(), ValidationError> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(ValidationError::RatingOutOfRange)
    }
}

/// # Errors
///
/// Returns [`ValidationError::TooLong`] past 150 characters. Empty is fine.
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    limit_text("description", description, DESCRIPTION_MAX_CHARS)
}
