//! Stats service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::stats::{
        errors::StatsServiceError, records::BaseInfo, repository::PgStatsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgStatsService {
    db: Db,
    repository: PgStatsRepository,
}

impl PgStatsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgStatsRepository::new(),
        }
    }
}

#[async_trait]
impl StatsService for PgStatsService {
    async fn base_info(&self) -> Result<BaseInfo, StatsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let info = self.repository.base_info(&mut tx).await?;

        tx.commit().await?;

        Ok(info)
    }
}

#[automock]
#[async_trait]
pub trait StatsService: Send + Sync {
    /// Platform-wide counters. Public.
    async fn base_info(&self) -> Result<BaseInfo, StatsServiceError>;
}
