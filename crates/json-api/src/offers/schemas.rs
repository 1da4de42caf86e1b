//! Offer request and response schemas.
//!
//! Each operation has its own shape: listings link to tiers, while create and
//! update echo full tier bodies.

use rust_decimal::Decimal;
use salvo::{oapi::ToSchema, prelude::Request};
use serde::{Deserialize, Deserializer, Serialize};

use marketplace_app::domain::{
    offers::{
        data::{NewOffer, NewOfferDetail, OfferDetailUpdate, OfferUpdate, TierUpdate},
        records::{Offer, OfferDetailId, OfferDetailRecord},
    },
    pagination::Page,
    users::records::UserSummary,
};

use crate::extensions::*;

/// Create Offer Request
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CreateOfferRequest {
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Exactly one basic, one standard and one premium tier
    pub details: Vec<CreateOfferDetailRequest>,
}

/// Create Offer Detail Request
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CreateOfferDetailRequest {
    pub title: String,
    pub revisions: i32,
    pub delivery_time_in_days: i32,
    #[salvo(schema(value_type = f64))]
    pub price: Decimal,
    #[serde(default)]
    pub features: Vec<String>,
    /// `basic`, `standard` or `premium`
    pub offer_type: String,
}

impl From<CreateOfferRequest> for NewOffer {
    fn from(request: CreateOfferRequest) -> Self {
        NewOffer {
            title: request.title,
            image: request.image,
            description: request.description,
            details: request.details.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<CreateOfferDetailRequest> for NewOfferDetail {
    fn from(request: CreateOfferDetailRequest) -> Self {
        NewOfferDetail {
            title: request.title,
            revisions: request.revisions,
            delivery_time_in_days: request.delivery_time_in_days,
            price: request.price,
            features: request.features,
            offer_type: request.offer_type,
        }
    }
}

/// Partial tier update. The tier name itself cannot be changed.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub(crate) struct UpdateOfferDetailRequest {
    pub title: Option<String>,
    pub revisions: Option<i32>,
    pub delivery_time_in_days: Option<i32>,
    #[salvo(schema(value_type = Option<f64>))]
    pub price: Option<Decimal>,
    pub features: Option<Vec<String>>,
}

impl From<UpdateOfferDetailRequest> for OfferDetailUpdate {
    fn from(request: UpdateOfferDetailRequest) -> Self {
        OfferDetailUpdate {
            title: request.title,
            revisions: request.revisions,
            delivery_time_in_days: request.delivery_time_in_days,
            price: request.price,
            features: request.features,
        }
    }
}

/// Nested tier change, addressed by tier name
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct UpdateOfferTierRequest {
    #[serde(default)]
    pub offer_type: String,
    #[serde(flatten)]
    pub changes: UpdateOfferDetailRequest,
}

/// Update Offer Request
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct UpdateOfferRequest {
    pub title: Option<String>,
    /// `null` removes the image
    #[serde(default, deserialize_with = "present")]
    #[salvo(schema(value_type = Option<String>))]
    pub image: Option<Option<String>>,
    pub description: Option<String>,
    #[serde(default)]
    pub details: Vec<UpdateOfferTierRequest>,
}

/// Marks a field as sent, so that an explicit `null` is told apart from an
/// absent key.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl From<UpdateOfferRequest> for OfferUpdate {
    fn from(request: UpdateOfferRequest) -> Self {
        OfferUpdate {
            title: request.title,
            image: request.image,
            description: request.description,
            details: request
                .details
                .into_iter()
                .map(|tier| TierUpdate {
                    offer_type: tier.offer_type,
                    changes: tier.changes.into(),
                })
                .collect(),
        }
    }
}

/// Link to a single tier
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OfferDetailLinkResponse {
    pub id: i64,
    pub url: String,
}

/// Public name fields of the offer's owner
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserDetailsResponse {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
}

impl From<UserSummary> for UserDetailsResponse {
    fn from(user: UserSummary) -> Self {
        UserDetailsResponse {
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
        }
    }
}

/// Offer as shown in listings and single-offer reads
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OfferSummaryResponse {
    pub id: i64,
    /// Owner user id
    pub user: i64,
    pub title: String,
    pub image: Option<String>,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
    pub details: Vec<OfferDetailLinkResponse>,
    /// Lowest tier price
    #[salvo(schema(value_type = Option<f64>))]
    pub min_price: Option<Decimal>,
    /// Shortest tier delivery time in days
    pub min_delivery_time: Option<i32>,
    pub user_details: UserDetailsResponse,
}

impl OfferSummaryResponse {
    pub(crate) fn new(offer: Offer, link: impl Fn(OfferDetailId) -> String) -> Self {
        let min_price = offer.min_price();
        let min_delivery_time = offer.min_delivery_time();
        let Offer { record, details } = offer;

        OfferSummaryResponse {
            id: record.id.into_i64(),
            user: record.user_id.into_i64(),
            title: record.title,
            image: record.image,
            description: record.description,
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
            details: details
                .iter()
                .map(|detail| OfferDetailLinkResponse {
                    id: detail.id.into_i64(),
                    url: link(detail.id),
                })
                .collect(),
            min_price,
            min_delivery_time,
            user_details: record.owner.into(),
        }
    }
}

/// Tier body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OfferDetailResponse {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub revisions: i32,
    pub delivery_time_in_days: i32,
    #[salvo(schema(value_type = f64))]
    pub price: Decimal,
    pub features: Vec<String>,
    pub offer_type: String,
}

impl OfferDetailResponse {
    pub(crate) fn new(detail: OfferDetailRecord, url: String) -> Self {
        OfferDetailResponse {
            id: detail.id.into_i64(),
            url,
            title: detail.title,
            revisions: detail.revisions,
            delivery_time_in_days: detail.delivery_time_in_days,
            price: detail.price,
            features: detail.features,
            offer_type: detail.offer_type.to_string(),
        }
    }
}

/// Offer with full tier bodies, returned from create and update
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OfferResponse {
    pub id: i64,
    pub user: i64,
    pub title: String,
    pub image: Option<String>,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
    pub details: Vec<OfferDetailResponse>,
    #[salvo(schema(value_type = Option<f64>))]
    pub min_price: Option<Decimal>,
    pub min_delivery_time: Option<i32>,
}

impl OfferResponse {
    pub(crate) fn new(offer: Offer, link: impl Fn(OfferDetailId) -> String) -> Self {
        let min_price = offer.min_price();
        let min_delivery_time = offer.min_delivery_time();
        let Offer { record, details } = offer;

        OfferResponse {
            id: record.id.into_i64(),
            user: record.user_id.into_i64(),
            title: record.title,
            image: record.image,
            description: record.description,
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
            details: details
                .into_iter()
                .map(|detail| {
                    let url = link(detail.id);

                    OfferDetailResponse::new(detail, url)
                })
                .collect(),
            min_price,
            min_delivery_time,
        }
    }
}

/// One page of offers
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OfferPageResponse {
    /// Total number of matching offers
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<OfferSummaryResponse>,
}

impl OfferPageResponse {
    pub(crate) fn new(page: Page<Offer>, req: &Request) -> Self {
        let current = page.request.page;

        let next = page.has_next().then(|| req.page_link(current + 1));
        let previous = page.has_previous().then(|| req.page_link(current - 1));

        OfferPageResponse {
            count: page.count,
            next,
            previous,
            results: page
                .items
                .into_iter()
                .map(|offer| OfferSummaryResponse::new(offer, relative_detail_link))
                .collect(),
        }
    }
}

/// Tier link used in listings.
pub(crate) fn relative_detail_link(detail: OfferDetailId) -> String {
    format!("/offerdetails/{detail}/")
}

/// Tier link used in single-offer reads.
pub(crate) fn absolute_detail_link(base_url: &str, detail: OfferDetailId) -> String {
    format!("{base_url}/api/offerdetails/{detail}/")
}
