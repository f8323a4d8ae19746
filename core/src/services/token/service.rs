//! Main token service implementation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::token::{Claims, RefreshToken, TokenPair};
use crate::errors::{DomainError, TokenError};
use crate::repositories::TokenRepository;

use super::config::TokenServiceConfig;

/// Length of the opaque refresh-token credential
const REFRESH_TOKEN_LENGTH: usize = 64;

/// Service issuing and validating access/refresh token pairs
///
/// Issuance always inserts a new store row; refresh rotates (the caller
/// revokes the presented token and issues a fresh pair) rather than renewing
/// a row in place.
pub struct TokenService<R: TokenRepository> {
    repository: Arc<R>,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<R: TokenRepository> TokenService<R> {
    /// Creates a new token service instance
    pub fn new(repository: Arc<R>, config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[&config.issuer]);
        validation.validate_exp = true;

        Self {
            repository,
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issues a new access/refresh token pair for a principal
    ///
    /// Side effect: exactly one new row in the token store. The raw refresh
    /// credential is returned to the caller and only its digest is persisted.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The generated token pair
    /// * `Err(DomainError::Storage)` - The row insert could not complete
    pub async fn issue_tokens(&self, owner_id: Uuid) -> Result<TokenPair, DomainError> {
        let access_lifetime = Duration::minutes(self.config.access_token_expiry_minutes);
        let refresh_lifetime = Duration::days(self.config.refresh_token_expiry_days);

        let claims = Claims::new_access_token(owner_id, &self.config.issuer, access_lifetime);
        let access_token = self.encode_jwt(&claims)?;

        let refresh_value = generate_refresh_value();
        let record = RefreshToken::new(owner_id, hash_token(&refresh_value), refresh_lifetime);
        self.repository.save_refresh_token(record).await?;

        Ok(TokenPair::new(
            access_token,
            refresh_value,
            self.config.access_token_expiry_minutes * 60,
            self.config.refresh_token_expiry_days * 24 * 60 * 60,
        ))
    }

    /// Validates a presented refresh token and returns its owner
    ///
    /// The liveness decision is taken against a single `now` snapshot. A
    /// missing, revoked, and expired token all fail with the same opaque
    /// error so callers cannot probe which case they hit.
    ///
    /// # Returns
    ///
    /// * `Ok(Uuid)` - The owner ID, for minting a new pair
    /// * `Err(TokenError::InvalidToken)` - Token is unusable
    /// * `Err(DomainError::Storage)` - The lookup itself failed
    pub async fn validate_refresh(&self, token: &str) -> Result<Uuid, DomainError> {
        let record = self
            .repository
            .find_refresh_token(&hash_token(token))
            .await?
            .ok_or(TokenError::InvalidToken)?;

        let now = Utc::now();
        if !record.is_live_at(now) {
            return Err(TokenError::InvalidToken.into());
        }

        Ok(record.owner_id)
    }

    /// Revokes a refresh token if it is currently live
    ///
    /// Idempotent: revoking an already-revoked, expired, or unknown token is
    /// a no-op rather than an error, so logout can be retried freely and the
    /// response leaks nothing about whether the token existed.
    pub async fn revoke_refresh_token(&self, token: &str) -> Result<(), DomainError> {
        let now = Utc::now();
        self.repository
            .revoke_refresh_token(&hash_token(token), now)
            .await?;
        Ok(())
    }

    /// Verifies an access token and returns the claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if the signature and expiry hold
    /// * `Err(TokenError::InvalidToken)` - Token is invalid, expired, or malformed
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| TokenError::InvalidToken)?;
        Ok(token_data.claims)
    }

    /// Encodes claims into a JWT
    fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key).map_err(|e| DomainError::Internal {
            message: format!("Failed to sign access token: {}", e),
        })
    }
}

/// Hashes a refresh-token credential for storage lookup
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Generates a random alphanumeric refresh-token credential
fn generate_refresh_value() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(REFRESH_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}
