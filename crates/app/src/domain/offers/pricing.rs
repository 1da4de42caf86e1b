//! Derived offer pricing.
//!
//! Computed from the loaded tiers on every read; nothing here is stored.

use rust_decimal::Decimal;

use crate::domain::offers::records::OfferDetailRecord;

/// Lowest price across the given tiers, `None` when there are none.
#[must_use]
pub fn min_price(details: &[OfferDetailRecord]) -> Option<Decimal> {
    details.iter().map(|detail| detail.price).min()
}

/// Shortest delivery time across the given tiers, `None` when there are none.
#[must_use]
pub fn min_delivery_time(details: &[OfferDetailRecord]) -> Option<i32> {
    details
        .iter()
        .map(|detail| detail.delivery_time_in_days)
        .min()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::offers::records::{OfferDetailId, OfferId, OfferType};

    use super::*;

    fn detail(offer_type: OfferType, price: i64, days: i32) -> OfferDetailRecord {
        OfferDetailRecord {
            id: OfferDetailId::from_i64(price),
            offer_id: OfferId::from_i64(1),
            title: offer_type.to_string(),
            revisions: 1,
            delivery_time_in_days: days,
            price: Decimal::new(price, 2),
            offer_type,
            features: vec![],
        }
    }

    #[test]
    fn minimums_are_taken_independently() {
        let details = [
            detail(OfferType::Basic, 10_000, 7),
            detail(OfferType::Standard, 5_050, 9),
            detail(OfferType::Premium, 20_000, 3),
        ];

        assert_eq!(min_price(&details), Some(Decimal::new(5_050, 2)));
        assert_eq!(min_delivery_time(&details), Some(3));
    }

    #[test]
    fn empty_offer_has_no_minimums() {
        assert_eq!(min_price(&[]), None);
        assert_eq!(min_delivery_time(&[]), None);
    }

    #[test]
    fn zero_price_counts_as_minimum() {
        let details = [
            detail(OfferType::Basic, 0, 1),
            detail(OfferType::Premium, 100, 1),
        ];

        assert_eq!(min_price(&details), Some(Decimal::ZERO));
    }
}
