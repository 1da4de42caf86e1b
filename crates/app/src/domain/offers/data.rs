//! Offers Data

use rust_decimal::Decimal;

use crate::domain::{pagination::PageRequest, users::records::UserId};

/// New Offer Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewOffer {
    pub title: String,
    pub image: Option<String>,
    pub description: String,
    pub details: Vec<NewOfferDetail>,
}

/// New Offer Detail Data
///
/// `offer_type` is kept as submitted so that the tier set can be checked as a
/// whole before anything is parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOfferDetail {
    pub title: String,
    pub revisions: i32,
    pub delivery_time_in_days: i32,
    pub price: Decimal,
    pub features: Vec<String>,
    pub offer_type: String,
}

/// Partial update of a single tier. The tier itself is never changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferDetailUpdate {
    pub title: Option<String>,
    pub revisions: Option<i32>,
    pub delivery_time_in_days: Option<i32>,
    pub price: Option<Decimal>,
    pub features: Option<Vec<String>>,
}

/// Nested tier change inside an offer update, addressed by tier name.
#[derive(Debug, Clone, PartialEq)]
pub struct TierUpdate {
    pub offer_type: String,
    pub changes: OfferDetailUpdate,
}

/// Offer Update Data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferUpdate {
    pub title: Option<String>,

    /// `Some(None)` removes the image; `None` leaves it as it is.
    pub image: Option<Option<String>>,
    pub description: Option<String>,
    pub details: Vec<TierUpdate>,
}

/// Sort keys accepted for offer listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferOrdering {
    UpdatedAt,
    UpdatedAtDesc,
    MinPrice,
    MinPriceDesc,
}

impl OfferOrdering {
    /// Parse an `ordering` query value. Comma-separated keys are tried in
    /// turn; unknown keys are ignored and yield `None` (default order).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        raw.split(',').find_map(|key| match key.trim() {
            "updated_at" => Some(Self::UpdatedAt),
            "-updated_at" => Some(Self::UpdatedAtDesc),
            "min_price" => Some(Self::MinPrice),
            "-min_price" => Some(Self::MinPriceDesc),
            _ => None,
        })
    }

    #[must_use]
    pub const fn as_key(self) -> &'static str {
        match self {
            Self::UpdatedAt => "updated_at",
            Self::UpdatedAtDesc => "-updated_at",
            Self::MinPrice => "min_price",
            Self::MinPriceDesc => "-min_price",
        }
    }
}

/// Offer listing filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferQuery {
    pub creator_id: Option<UserId>,
    pub min_price: Option<Decimal>,
    pub max_delivery_time: Option<i32>,
    pub search: Option<String>,
    pub ordering: Option<OfferOrdering>,
    pub page: PageRequest,
}

impl OfferQuery {
    /// `ILIKE` pattern for the free-text search, with wildcards escaped.
    #[must_use]
    pub fn search_pattern(&self) -> Option<String> {
        let term = self.search.as_deref().map(str::trim)?;

        if term.is_empty() {
            return None;
        }

        let escaped = term
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");

        Some(format!("%{escaped}%"))
    }
}
