//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::{
    auth::{
        AuthServiceError, IssuedApiToken, NewApiToken, Principal, format_api_token,
        generate_api_token_secret, hash_api_token_secret, parse_api_token,
        repository::PgAuthRepository, verifiers_match,
    },
    domain::users::records::UserId,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new API token for the given user. The raw token is only
    /// available in the returned value; storage keeps its hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insertion fails.
    pub async fn issue_api_token(&self, user: UserId) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid, &secret);

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token_uuid,
                user_id: user,
                token_hash: hash_api_token_secret(&token_uuid, &secret),
            })
            .await?;

        Ok(IssuedApiToken { token, metadata })
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_token(&self, token: &str) -> Result<Principal, AuthServiceError> {
        let parsed = parse_api_token(token).map_err(|error| {
            debug!("rejecting malformed api token: {error}");

            AuthServiceError::NotFound
        })?;

        let stored = self
            .repository
            .find_api_token(parsed.token_uuid)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        let presented = hash_api_token_secret(&parsed.token_uuid, &parsed.secret);

        if !verifiers_match(&stored.token_hash, &presented) {
            return Err(AuthServiceError::NotFound);
        }

        // Best-effort metadata update; auth success should not depend on this write.
        let _touch_result = self
            .repository
            .touch_api_token_last_used(parsed.token_uuid)
            .await;

        Ok(stored.principal)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw API token to the principal it was issued for.
    async fn authenticate_token(&self, token: &str) -> Result<Principal, AuthServiceError>;
}
