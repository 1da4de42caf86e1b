//! Offers service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    auth::Principal,
    database::Db,
    domain::{
        offers::{
            data::{NewOffer, OfferDetailUpdate, OfferQuery, OfferUpdate},
            errors::OffersServiceError,
            records::{Offer, OfferDetailId, OfferDetailRecord, OfferId, OfferType},
            repository::PgOffersRepository,
            validation,
        },
        pagination::Page,
        validation::ValidationError,
    },
    policy::{self, Operation, Resource},
};

#[derive(Debug, Clone)]
pub struct PgOffersService {
    db: Db,
    repository: PgOffersRepository,
}

impl PgOffersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOffersRepository::new(),
        }
    }

    /// Lock the offer row and check that `principal` owns it.
    async fn lock_owned_offer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        principal: &Principal,
        offer: OfferId,
    ) -> Result<(), OffersServiceError> {
        let owner = self
            .repository
            .lock_offer_owner(tx, offer)
            .await?
            .ok_or(OffersServiceError::NotFound)?;

        policy::authorize_owner(principal, owner)?;

        Ok(())
    }
}

#[async_trait]
impl OffersService for PgOffersService {
    async fn list_offers(
        &self,
        principal: Option<Principal>,
        query: OfferQuery,
    ) -> Result<Page<Offer>, OffersServiceError> {
        policy::check(principal.as_ref(), Resource::Offers, Operation::List)?;

        let mut tx = self.db.begin_transaction().await?;

        let count = self.repository.count_offers(&mut tx, &query).await?;

        if query.page.is_out_of_range(count) {
            return Err(OffersServiceError::InvalidPage);
        }

        let offers = self.repository.list_offers(&mut tx, &query).await?;

        tx.commit().await?;

        Ok(Page {
            count,
            items: offers,
            request: query.page,
        })
    }

    async fn get_offer(
        &self,
        principal: Option<Principal>,
        offer: OfferId,
    ) -> Result<Offer, OffersServiceError> {
        policy::authorize(principal.as_ref(), Resource::Offers, Operation::Retrieve)?;

        let mut tx = self.db.begin_transaction().await?;

        let offer = self.repository.get_offer(&mut tx, offer).await?;

        tx.commit().await?;

        Ok(offer)
    }

    async fn create_offer(
        &self,
        principal: Option<Principal>,
        offer: NewOffer,
    ) -> Result<Offer, OffersServiceError> {
        let principal = policy::authorize(principal.as_ref(), Resource::Offers, Operation::Create)?;

        let tiers = validation::validate_new_offer(&offer)?;

        let mut tx = self.db.begin_transaction().await?;

        let offer_id = self
            .repository
            .create_offer(&mut tx, principal.id, &offer, &tiers)
            .await?;

        let created = self.repository.get_offer(&mut tx, offer_id).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_offer(
        &self,
        principal: Option<Principal>,
        offer: OfferId,
        update: OfferUpdate,
    ) -> Result<Offer, OffersServiceError> {
        let principal = policy::authorize(principal.as_ref(), Resource::Offers, Operation::Update)?;

        let mut tx = self.db.begin_transaction().await?;

        self.lock_owned_offer(&mut tx, principal, offer).await?;

        validation::validate_offer_update(&update)?;

        let current = self.repository.get_offer(&mut tx, offer).await?;

        for tier in &update.details {
            let offer_type = tier.offer_type.trim().parse::<OfferType>()?;

            let detail = current
                .detail(offer_type)
                .ok_or_else(|| ValidationError::UnknownTier(tier.offer_type.clone()))?;

            self.repository
                .update_offer_detail(&mut tx, detail.id, &tier.changes)
                .await?;
        }

        self.repository.update_offer(&mut tx, offer, &update).await?;

        let refreshed = self.repository.get_offer(&mut tx, offer).await?;

        tx.commit().await?;

        Ok(refreshed)
    }

    async fn authorize_offer_update(
        &self,
        principal: Option<Principal>,
        offer: OfferId,
    ) -> Result<(), OffersServiceError> {
        let principal = policy::authorize(principal.as_ref(), Resource::Offers, Operation::Update)?;

        let mut tx = self.db.begin_transaction().await?;

        self.lock_owned_offer(&mut tx, principal, offer).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn delete_offer(
        &self,
        principal: Option<Principal>,
        offer: OfferId,
    ) -> Result<(), OffersServiceError> {
        let principal = policy::authorize(principal.as_ref(), Resource::Offers, Operation::Delete)?;

        let mut tx = self.db.begin_transaction().await?;

        self.lock_owned_offer(&mut tx, principal, offer).await?;

        let rows_affected = self.repository.delete_offer(&mut tx, offer).await?;

        if rows_affected == 0 {
            return Err(OffersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn get_offer_detail(
        &self,
        principal: Option<Principal>,
        detail: OfferDetailId,
    ) -> Result<OfferDetailRecord, OffersServiceError> {
        policy::authorize(
            principal.as_ref(),
            Resource::OfferDetails,
            Operation::Retrieve,
        )?;

        let mut tx = self.db.begin_transaction().await?;

        let detail = self.repository.get_offer_detail(&mut tx, detail).await?;

        tx.commit().await?;

        Ok(detail)
    }

    async fn authorize_offer_detail_update(
        &self,
        principal: Option<Principal>,
        detail: OfferDetailId,
    ) -> Result<(), OffersServiceError> {
        policy::authorize(
            principal.as_ref(),
            Resource::OfferDetails,
            Operation::Update,
        )?;

        let mut tx = self.db.begin_transaction().await?;

        self.repository.get_offer_detail(&mut tx, detail).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn update_offer_detail(
        &self,
        principal: Option<Principal>,
        detail: OfferDetailId,
        update: OfferDetailUpdate,
    ) -> Result<OfferDetailRecord, OffersServiceError> {
        policy::authorize(
            principal.as_ref(),
            Resource::OfferDetails,
            Operation::Update,
        )?;

        let mut tx = self.db.begin_transaction().await?;

        // Existence first so that an unknown id is a 404 even with a bad payload.
        self.repository.get_offer_detail(&mut tx, detail).await?;

        validation::validate_detail_update(&update)?;

        let updated = self
            .repository
            .update_offer_detail(&mut tx, detail, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OffersService: Send + Sync {
    /// Retrieves one page of offers matching the query. Open to anonymous callers.
    async fn list_offers(
        &self,
        principal: Option<Principal>,
        query: OfferQuery,
    ) -> Result<Page<Offer>, OffersServiceError>;

    /// Retrieve a single offer with its tiers.
    async fn get_offer(
        &self,
        principal: Option<Principal>,
        offer: OfferId,
    ) -> Result<Offer, OffersServiceError>;

    /// Creates an offer and its three tiers atomically, owned by the caller.
    async fn create_offer(
        &self,
        principal: Option<Principal>,
        offer: NewOffer,
    ) -> Result<Offer, OffersServiceError>;

    /// Partially updates an offer and any of its tiers, addressed by tier name.
    async fn update_offer(
        &self,
        principal: Option<Principal>,
        offer: OfferId,
        update: OfferUpdate,
    ) -> Result<Offer, OffersServiceError>;

    /// Runs every check `update_offer` makes before it reads the payload:
    /// authentication, existence and ownership.
    async fn authorize_offer_update(
        &self,
        principal: Option<Principal>,
        offer: OfferId,
    ) -> Result<(), OffersServiceError>;

    /// Deletes an offer together with its tiers and their orders.
    async fn delete_offer(
        &self,
        principal: Option<Principal>,
        offer: OfferId,
    ) -> Result<(), OffersServiceError>;

    /// Retrieve a single tier.
    async fn get_offer_detail(
        &self,
        principal: Option<Principal>,
        detail: OfferDetailId,
    ) -> Result<OfferDetailRecord, OffersServiceError>;

    /// Authentication and existence checks of `update_offer_detail`.
    async fn authorize_offer_detail_update(
        &self,
        principal: Option<Principal>,
        detail: OfferDetailId,
    ) -> Result<(), OffersServiceError>;

    /// Partially updates a single tier. The tier name cannot change.
    async fn update_offer_detail(
        &self,
        principal: Option<Principal>,
        detail: OfferDetailId,
        update: OfferDetailUpdate,
    ) -> Result<OfferDetailRecord, OffersServiceError>;
}
