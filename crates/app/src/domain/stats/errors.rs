//! Stats service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsServiceError {
    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}
