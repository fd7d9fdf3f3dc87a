//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use tracing::{debug, warn};

use crate::{
    auth::{
        AuthServiceError,
        models::{ApiTokenMetadata, ApiTokenUuid, IssuedApiToken, NewApiToken},
        repository::PgAuthRepository,
        token::BearerToken,
    },
    domain::users::UserUuid,
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

    /// Issue a new API token for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be stored.
    pub async fn issue_api_token(
        &self,
        user: UserUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token = BearerToken::generate();

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token.token_uuid,
                user_uuid: user,
                version: token.version,
                token_hash: token.verifier(user),
                expires_at,
            })
            .await?;

        Ok(IssuedApiToken {
            token: token.to_string(),
            metadata,
        })
    }

    /// List all tokens for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_api_tokens(
        &self,
        user: UserUuid,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        Ok(self.repository.list_api_tokens_for_user(user).await?)
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(&self, token: ApiTokenUuid) -> Result<bool, AuthServiceError> {
        Ok(self.repository.revoke_api_token(token).await?.is_some())
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError> {
        let presented: BearerToken = bearer_token.parse().map_err(|error| {
            debug!(%error, "rejected malformed bearer token");

            AuthServiceError::NotFound
        })?;

        let stored = self
            .repository
            .find_active_api_token(presented.token_uuid, presented.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if stored.version != presented.version
            || !presented.matches(stored.user_uuid, &stored.token_hash)
        {
            return Err(AuthServiceError::NotFound);
        }

        if let Err(error) = self.repository.touch_api_token(presented.token_uuid).await {
            warn!(%error, token_uuid = %presented.token_uuid, "failed to record token use");
        }

        Ok(stored.user_uuid)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve the user that owns a raw bearer token.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, ToSpan};
    use testresult::TestResult;

    use crate::test::TestDb;

    use super::*;

    #[tokio::test]
    async fn issued_token_authenticates_its_user() -> TestResult {
        let db = TestDb::new().await;
        let service = PgAuthService::new(db.pool().clone());
        let user = UserUuid::new();

        let issued = service.issue_api_token(user, None).await?;

        assert_eq!(service.authenticate_bearer(&issued.token).await?, user);

        let listed = service.list_api_tokens(user).await?;

        assert_eq!(listed.len(), 1);
        assert!(
            listed.first().is_some_and(|t| t.last_used_at.is_some()),
            "authentication should record last use"
        );

        Ok(())
    }

    #[tokio::test]
    async fn revoked_token_is_rejected() -> TestResult {
        let db = TestDb::new().await;
        let service = PgAuthService::new(db.pool().clone());

        let issued = service.issue_api_token(UserUuid::new(), None).await?;

        assert!(service.revoke_api_token(issued.metadata.uuid).await?);
        assert!(
            !service.revoke_api_token(issued.metadata.uuid).await?,
            "second revoke is a no-op"
        );

        let result = service.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn expired_token_is_rejected() -> TestResult {
        let db = TestDb::new().await;
        let service = PgAuthService::new(db.pool().clone());
        let expired = Timestamp::now().checked_sub(1.hour())?;

        let issued = service.issue_api_token(UserUuid::new(), Some(expired)).await?;

        let result = service.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn tampered_secret_is_rejected() -> TestResult {
        let db = TestDb::new().await;
        let service = PgAuthService::new(db.pool().clone());

        let issued = service.issue_api_token(UserUuid::new(), None).await?;

        let (head, _secret) = issued.token.split_once('.').ok_or("token has no secret")?;
        let forged = format!("{head}.{}", "0".repeat(64));

        let result = service.authenticate_bearer(&forged).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
