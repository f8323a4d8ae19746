//! Token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

use super::sweep::SweepCriteria;

/// Repository trait for RefreshToken entity persistence operations
///
/// Each method runs in its own transaction; no lock spans two calls. Liveness
/// decisions (expiry, revocation) belong to the caller — the repository only
/// persists and filters rows.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a new refresh token row
    ///
    /// Issuance never overwrites: every call inserts a fresh row, and a
    /// duplicate `token_hash` is a storage error (unique constraint).
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The saved token
    /// * `Err(DomainError::Storage)` - Insert could not complete
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a refresh token by its hashed value
    ///
    /// # Returns
    /// * `Ok(Some(RefreshToken))` - Token found (live or not)
    /// * `Ok(None)` - No row with the given hash
    /// * `Err(DomainError::Storage)` - Lookup failed
    async fn find_refresh_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshToken>, DomainError>;

    /// Mark the matching row revoked at the given instant, if it is live
    ///
    /// Rows that are already revoked, expired, or absent are left untouched,
    /// which makes revocation safely retryable.
    ///
    /// # Returns
    /// * `Ok(true)` - A live row was revoked
    /// * `Ok(false)` - Nothing to do
    /// * `Err(DomainError::Storage)` - Update failed
    async fn revoke_refresh_token(
        &self,
        token_hash: &str,
        revoked_at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Delete every row matching the sweep criteria, atomically
    ///
    /// Either all matching rows are deleted and the count is returned, or the
    /// transaction rolls back and no row is touched.
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of rows deleted
    /// * `Err(DomainError::Storage)` - Sweep transaction failed and rolled back
    async fn delete_stale_tokens(&self, criteria: &SweepCriteria) -> Result<u64, DomainError>;
}
