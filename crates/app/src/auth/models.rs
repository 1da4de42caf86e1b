//! Auth data models.

use jiff::Timestamp;
use uuid::Uuid;

use crate::{auth::Principal, domain::users::records::UserId};

/// Stored token joined with the identity it authenticates.
#[derive(Debug, Clone)]
pub(crate) struct ActiveApiToken {
    pub principal: Principal,

    /// SHA-256 verifier for the token secret.
    pub token_hash: String,
}

/// API token metadata persisted in storage.
#[derive(Debug, Clone)]
pub struct ApiTokenMetadata {
    pub uuid: Uuid,
    pub user_id: UserId,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
}

/// New API token persistence payload.
#[derive(Debug, Clone)]
pub struct NewApiToken {
    pub uuid: Uuid,
    pub user_id: UserId,
    pub token_hash: String,
}

/// API token issuance result with one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedApiToken {
    pub token: String,
    pub metadata: ApiTokenMetadata,
}
