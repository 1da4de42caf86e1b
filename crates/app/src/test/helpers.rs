//! Test Helpers

use rust_decimal::Decimal;

use crate::{
    domain::offers::{
        OffersService, OffersServiceError,
        data::{NewOffer, NewOfferDetail},
        records::Offer,
    },
    test::TestContext,
};

/// A tier priced at `100 * step` with `1 + 2 * step` delivery days.
pub(crate) fn new_offer_detail(offer_type: &str, step: i32) -> NewOfferDetail {
    NewOfferDetail {
        title: format!("{offer_type} package"),
        revisions: step,
        delivery_time_in_days: 1 + 2 * step,
        price: Decimal::from(100 * step),
        features: vec!["Logo design".to_string(), "Visitenkarte".to_string()],
        offer_type: offer_type.to_string(),
    }
}

/// Offer with basic/standard/premium tiers at 100/200/300 and 3/5/7 days.
pub(crate) fn new_offer(title: &str) -> NewOffer {
    NewOffer {
        title: title.to_string(),
        image: None,
        description: "Ein professionelles Angebot.".to_string(),
        details: vec![
            new_offer_detail("basic", 1),
            new_offer_detail("standard", 2),
            new_offer_detail("premium", 3),
        ],
    }
}

/// Create a default offer owned by the context's business user.
pub(crate) async fn create_offer(ctx: &TestContext) -> Result<Offer, OffersServiceError> {
    ctx.offers
        .create_offer(Some(ctx.business_principal()), new_offer("Grafikdesign-Paket"))
        .await
}

pub(crate) async fn count_rows(ctx: &TestContext, table: &str) -> Result<i64, sqlx::Error> {
    let sql = format!("SELECT COUNT(*) FROM {table}");

    sqlx::query_scalar(&sql)
        .fetch_one(ctx.db.pool())
        .await
}
