//! Payload validation shared by the engines.

use thiserror::Error;

/// A payload rule violation. Always surfaces as a client error and always
/// aborts the whole containing operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("an offer requires exactly 3 details, got {0}")]
    DetailCount(usize),

    #[error("offer details must contain exactly one basic, one standard and one premium tier")]
    TierSet,

    #[error("unknown offer type: {0}")]
    UnknownTier(String),

    #[error("{0} must not be blank")]
    Blank(&'static str),

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("revisions must be zero or greater")]
    NegativeRevisions,

    #[error("delivery_time_in_days must be at least 1")]
    DeliveryTime,

    #[error("price must be zero or greater")]
    NegativePrice,

    #[error("price must have at most 10 digits and 2 decimal places")]
    PricePrecision,

    #[error("rating must be between 1 and 5")]
    RatingOutOfRange,

    #[error("\"{0}\" is not a valid status")]
    UnknownOrderStatus(String),

    #[error("the selected user must be a business account")]
    NotABusinessUser,
}

pub(crate) fn require_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank(field));
    }

    limit_text(field, value, max)
}

pub(crate) fn limit_text(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(())
}
