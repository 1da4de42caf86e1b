//! Offer Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        offers::pricing,
        users::records::{UserId, UserSummary},
        validation::ValidationError,
    },
    ids::TypedId,
};

/// Offer ID
pub type OfferId = TypedId<OfferRecord>;

/// Offer Detail ID
pub type OfferDetailId = TypedId<OfferDetailRecord>;

/// Pricing tier of an offer detail. Every offer has exactly one of each.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OfferType {
    Basic,
    Standard,
    Premium,
}

impl OfferType {
    pub const ALL: [Self; 3] = [Self::Basic, Self::Standard, Self::Premium];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Standard => "standard",
            Self::Premium => "premium",
        }
    }
}

impl fmt::Display for OfferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OfferType {
    type Err = ValidationError;

    /// Tier names are matched case-insensitively.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| ValidationError::UnknownTier(value.to_string()))
    }
}

/// Offer row joined with its owner's public name fields.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferRecord {
    pub id: OfferId,
    pub user_id: UserId,
    pub title: String,
    pub image: Option<String>,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub owner: UserSummary,
}

/// Offer Detail Record
#[derive(Debug, Clone, PartialEq)]
pub struct OfferDetailRecord {
    pub id: OfferDetailId,
    pub offer_id: OfferId,
    pub title: String,
    pub revisions: i32,
    pub delivery_time_in_days: i32,
    pub price: Decimal,
    pub offer_type: OfferType,
    pub features: Vec<String>,
}

/// An offer together with its tiers, ordered by ascending price.
#[derive(Debug, Clone, PartialEq)]
pub struct Offer {
    pub record: OfferRecord,
    pub details: Vec<OfferDetailRecord>,
}

impl Offer {
    #[must_use]
    pub fn new(record: OfferRecord, mut details: Vec<OfferDetailRecord>) -> Self {
        details.sort_by(|a, b| a.price.cmp(&b.price).then(a.id.cmp(&b.id)));

        Self { record, details }
    }

    #[must_use]
    pub fn id(&self) -> OfferId {
        self.record.id
    }

    #[must_use]
    pub fn min_price(&self) -> Option<Decimal> {
        pricing::min_price(&self.details)
    }

    #[must_use]
    pub fn min_delivery_time(&self) -> Option<i32> {
        pricing::min_delivery_time(&self.details)
    }

    #[must_use]
    pub fn detail(&self, offer_type: OfferType) -> Option<&OfferDetailRecord> {
        self.details
            .iter()
            .find(|detail| detail.offer_type == offer_type)
    }
}
