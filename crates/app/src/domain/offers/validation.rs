//! Offer payload rules.

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::domain::{
    offers::{
        data::{NewOffer, NewOfferDetail, OfferDetailUpdate, OfferUpdate},
        records::OfferType,
    },
    validation::{ValidationError, limit_text, require_text},
};

pub const TITLE_MAX_CHARS: usize = 100;
pub const FEATURE_MAX_CHARS: usize = 50;

/// Exclusive upper bound for prices: ten digits, two of them decimals.
fn price_limit() -> Decimal {
    Decimal::new(100_000_000, 0)
}

/// Check that exactly three details cover exactly the three tiers, and return
/// the parsed tier of each detail in input order.
///
/// # Errors
///
/// Returns [`ValidationError::DetailCount`] for any count other than three,
/// [`ValidationError::UnknownTier`] for an unrecognised tier name and
/// [`ValidationError::TierSet`] for duplicates.
pub fn validate_tiers(details: &[NewOfferDetail]) -> Result<Vec<OfferType>, ValidationError> {
    if details.len() != OfferType::ALL.len() {
        return Err(ValidationError::DetailCount(details.len()));
    }

    let tiers = details
        .iter()
        .map(|detail| detail.offer_type.trim().parse::<OfferType>())
        .collect::<Result<Vec<_>, _>>()?;

    let distinct: BTreeSet<OfferType> = tiers.iter().copied().collect();

    if distinct.len() != OfferType::ALL.len() {
        return Err(ValidationError::TierSet);
    }

    Ok(tiers)
}

/// Validate an offer creation payload, including its tiers.
///
/// # Errors
///
/// Returns the first rule violation found.
pub fn validate_new_offer(offer: &NewOffer) -> Result<Vec<OfferType>, ValidationError> {
    require_text("title", &offer.title, TITLE_MAX_CHARS)?;
    require_text("description", &offer.description, usize::MAX)?;

    let tiers = validate_tiers(&offer.details)?;

    for detail in &offer.details {
        validate_new_detail(detail)?;
    }

    Ok(tiers)
}

/// Validate the top-level fields and every nested tier change of an update.
/// Tier names are resolved by the caller against the stored offer.
///
/// # Errors
///
/// Returns the first rule violation found.
pub fn validate_offer_update(update: &OfferUpdate) -> Result<(), ValidationError> {
    if let Some(title) = update.title.as_deref() {
        require_text("title", title, TITLE_MAX_CHARS)?;
    }

    if let Some(description) = update.description.as_deref() {
        require_text("description", description, usize::MAX)?;
    }

    for tier in &update.details {
        validate_detail_update(&tier.changes)?;
    }

    Ok(())
}

/// # Errors
///
/// Returns the first rule violation found.
pub fn validate_new_detail(detail: &NewOfferDetail) -> Result<(), ValidationError> {
    require_text("title", &detail.title, TITLE_MAX_CHARS)?;
    validate_revisions(detail.revisions)?;
    validate_delivery_time(detail.delivery_time_in_days)?;
    validate_price(detail.price)?;
    validate_features(&detail.features)
}

/// # Errors
///
/// Returns the first rule violation found among the fields present.
pub fn validate_detail_update(update: &OfferDetailUpdate) -> Result<(), ValidationError> {
    if let Some(title) = update.title.as_deref() {
        require_text("title", title, TITLE_MAX_CHARS)?;
    }

    if let Some(revisions) = update.revisions {
        validate_revisions(revisions)?;
    }

    if let Some(days) = update.delivery_time_in_days {
        validate_delivery_time(days)?;
    }

    if let Some(price) = update.price {
        validate_price(price)?;
    }

    if let Some(features) = update.features.as_deref() {
        validate_features(features)?;
    }

    Ok(())
}

fn validate_revisions(revisions: i32) -> Result<(), ValidationError> {
    if revisions < 0 {
        return Err(ValidationError::NegativeRevisions);
    }

    Ok(())
}

fn validate_delivery_time(days: i32) -> Result<(), ValidationError> {
    if days < 1 {
        return Err(ValidationError::DeliveryTime);
    }

    Ok(())
}

fn validate_price(price: Decimal) -> Result<(), ValidationError> {
    if price < Decimal::ZERO {
        return Err(ValidationError::NegativePrice);
    }

    if price.normalize().scale() > 2 || price >= price_limit() {
        return Err(ValidationError::PricePrecision);
    }

    Ok(())
}

fn validate_features(features: &[String]) -> Result<(), ValidationError> {
    for feature in features {
        limit_text("features", feature, FEATURE_MAX_CHARS)?;
    }

    Ok(())
}
