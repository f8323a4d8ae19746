//! Authentication service implementation

use std::sync::Arc;
use tracing::debug;

use crate::domain::entities::token::TokenPair;
use crate::errors::{AuthError, DomainError};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::token::TokenService;

/// Service wiring credential checks to token issuance
///
/// Thin by design: all token lifecycle rules live in `TokenService`, this
/// service only sequences them for the three auth operations.
pub struct AuthService<U: UserRepository, T: TokenRepository> {
    user_repository: Arc<U>,
    token_service: Arc<TokenService<T>>,
}

impl<U: UserRepository, T: TokenRepository> AuthService<U, T> {
    /// Creates a new auth service
    pub fn new(user_repository: Arc<U>, token_service: Arc<TokenService<T>>) -> Self {
        Self {
            user_repository,
            token_service,
        }
    }

    /// Authenticates a user by email and password and issues a token pair
    ///
    /// An unknown email and a wrong password both fail with the same error,
    /// so the response does not reveal which accounts exist.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, DomainError> {
        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.verify_password(password) {
            return Err(AuthError::InvalidCredentials.into());
        }

        debug!(user_id = %user.id, "login succeeded");
        self.token_service.issue_tokens(user.id).await
    }

    /// Exchanges a live refresh token for a new token pair
    ///
    /// Rotation, not renewal-in-place: the presented token is revoked and a
    /// fresh pair (with a new store row) is issued for the same owner.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, DomainError> {
        let owner_id = self.token_service.validate_refresh(refresh_token).await?;
        self.token_service
            .revoke_refresh_token(refresh_token)
            .await?;
        self.token_service.issue_tokens(owner_id).await
    }

    /// Revokes the presented refresh token
    ///
    /// Always succeeds for unusable tokens so logout is retryable and leaks
    /// nothing about token existence.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), DomainError> {
        self.token_service.revoke_refresh_token(refresh_token).await
    }
}
