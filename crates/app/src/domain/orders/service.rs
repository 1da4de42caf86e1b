//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    auth::Principal,
    database::Db,
    domain::{
        offers::records::OfferDetailId,
        orders::{
            errors::OrdersServiceError,
            records::{Order, OrderId, OrderStatus},
            repository::PgOrdersRepository,
        },
        users::{PgUsersRepository, records::UserId},
    },
    policy::{self, Operation, Resource},
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    users: PgUsersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
            users: PgUsersRepository::new(),
        }
    }

    /// Lock the order row and check that `principal` is its business user.
    async fn lock_owned_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        principal: &Principal,
        order: OrderId,
    ) -> Result<(), OrdersServiceError> {
        let owner = self
            .repository
            .lock_order_owner(tx, order)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        policy::authorize_owner(principal, owner)?;

        Ok(())
    }

    async fn count_for_business(
        &self,
        principal: Option<Principal>,
        business: UserId,
        status: Option<OrderStatus>,
    ) -> Result<u64, OrdersServiceError> {
        policy::authorize(
            principal.as_ref(),
            Resource::OrderCounts,
            Operation::Retrieve,
        )?;

        let mut tx = self.db.begin_transaction().await?;

        self.users
            .find_business_user(&mut tx, business)
            .await?
            .ok_or(OrdersServiceError::BusinessUserNotFound)?;

        let count = self
            .repository
            .count_orders(&mut tx, business, status)
            .await?;

        tx.commit().await?;

        Ok(count)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn list_orders(
        &self,
        principal: Option<Principal>,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        policy::authorize(principal.as_ref(), Resource::Orders, Operation::List)?;

        let mut tx = self.db.begin_transaction().await?;

        let orders = self.repository.list_orders(&mut tx).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn create_order(
        &self,
        principal: Option<Principal>,
        detail: OfferDetailId,
    ) -> Result<Order, OrdersServiceError> {
        let principal = policy::authorize(principal.as_ref(), Resource::Orders, Operation::Create)?;

        let mut tx = self.db.begin_transaction().await?;

        let business = self
            .repository
            .find_detail_owner(&mut tx, detail)
            .await?
            .ok_or(OrdersServiceError::OfferDetailNotFound)?;

        let order_id = self
            .repository
            .create_order(&mut tx, detail, business, principal.id)
            .await?;

        let order = self.repository.get_order(&mut tx, order_id).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn authorize_order_update(
        &self,
        principal: Option<Principal>,
        order: OrderId,
    ) -> Result<(), OrdersServiceError> {
        let principal = policy::authorize(principal.as_ref(), Resource::Orders, Operation::Update)?;

        let mut tx = self.db.begin_transaction().await?;

        self.lock_owned_order(&mut tx, principal, order).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn update_order_status(
        &self,
        principal: Option<Principal>,
        order: OrderId,
        status: String,
    ) -> Result<Order, OrdersServiceError> {
        let principal = policy::authorize(principal.as_ref(), Resource::Orders, Operation::Update)?;

        let mut tx = self.db.begin_transaction().await?;

        self.lock_owned_order(&mut tx, principal, order).await?;

        let status = status.parse::<OrderStatus>()?;

        self.repository
            .update_order_status(&mut tx, order, status)
            .await?;

        let updated = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_order(
        &self,
        principal: Option<Principal>,
        order: OrderId,
    ) -> Result<(), OrdersServiceError> {
        policy::authorize(principal.as_ref(), Resource::Orders, Operation::Delete)?;

        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_order(&mut tx, order).await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn order_count(
        &self,
        principal: Option<Principal>,
        business: UserId,
    ) -> Result<u64, OrdersServiceError> {
        self.count_for_business(principal, business, None).await
    }

    async fn completed_order_count(
        &self,
        principal: Option<Principal>,
        business: UserId,
    ) -> Result<u64, OrdersServiceError> {
        self.count_for_business(principal, business, Some(OrderStatus::Completed))
            .await
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Lists every order, oldest first.
    async fn list_orders(
        &self,
        principal: Option<Principal>,
    ) -> Result<Vec<Order>, OrdersServiceError>;

    /// Places an order for an offer detail on behalf of the calling customer.
    async fn create_order(
        &self,
        principal: Option<Principal>,
        detail: OfferDetailId,
    ) -> Result<Order, OrdersServiceError>;

    /// Authentication, existence and ownership checks of
    /// `update_order_status`, without a payload.
    async fn authorize_order_update(
        &self,
        principal: Option<Principal>,
        order: OrderId,
    ) -> Result<(), OrdersServiceError>;

    /// Changes the status of an order. Only its business user may do this.
    async fn update_order_status(
        &self,
        principal: Option<Principal>,
        order: OrderId,
        status: String,
    ) -> Result<Order, OrdersServiceError>;

    /// Deletes an order. Staff and superusers only.
    async fn delete_order(
        &self,
        principal: Option<Principal>,
        order: OrderId,
    ) -> Result<(), OrdersServiceError>;

    /// Number of orders placed with a business user.
    async fn order_count(
        &self,
        principal: Option<Principal>,
        business: UserId,
    ) -> Result<u64, OrdersServiceError>;

    /// Number of completed orders of a business user.
    async fn completed_order_count(
        &self,
        principal: Option<Principal>,
        business: UserId,
    ) -> Result<u64, OrdersServiceError>;
}
