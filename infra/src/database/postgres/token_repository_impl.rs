//! PostgreSQL implementation of the TokenRepository trait.
//!
//! Rows are looked up by token digest only; the raw credential never reaches
//! this layer. Every sqlx failure is reported as a storage error so the
//! service layer can surface it uniformly.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use cb_core::domain::entities::token::RefreshToken;
use cb_core::errors::DomainError;
use cb_core::repositories::{SweepCriteria, TokenRepository};

/// PostgreSQL implementation of TokenRepository
pub struct PgTokenRepository {
    /// Database connection pool
    pool: PgPool,
}

impl PgTokenRepository {
    /// Create a new PostgreSQL token repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a RefreshToken entity
    fn row_to_token(row: &sqlx::postgres::PgRow) -> Result<RefreshToken, DomainError> {
        Ok(RefreshToken {
            id: row
                .try_get("id")
                .map_err(|e| storage_error("read id", e))?,
            owner_id: row
                .try_get("owner_id")
                .map_err(|e| storage_error("read owner_id", e))?,
            token_hash: row
                .try_get("token_hash")
                .map_err(|e| storage_error("read token_hash", e))?,
            issued_at: row
                .try_get("issued_at")
                .map_err(|e| storage_error("read issued_at", e))?,
            expired_at: row
                .try_get("expired_at")
                .map_err(|e| storage_error("read expired_at", e))?,
            revoked_at: row
                .try_get("revoked_at")
                .map_err(|e| storage_error("read revoked_at", e))?,
        })
    }
}

fn storage_error(context: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::Storage {
        message: format!("Failed to {}: {}", context, e),
    }
}

#[async_trait]
impl TokenRepository for PgTokenRepository {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let query = r#"
            INSERT INTO refresh_tokens (
                id, owner_id, token_hash, issued_at, expired_at, revoked_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
        "#;

        // A duplicate token_hash trips the unique constraint and lands here
        // as a storage error like any other failed insert.
        sqlx::query(query)
            .bind(token.id)
            .bind(token.owner_id)
            .bind(&token.token_hash)
            .bind(token.issued_at)
            .bind(token.expired_at)
            .bind(token.revoked_at)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("save refresh token", e))?;

        Ok(token)
    }

    async fn find_refresh_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshToken>, DomainError> {
        let query = r#"
            SELECT id, owner_id, token_hash, issued_at, expired_at, revoked_at
            FROM refresh_tokens
            WHERE token_hash = $1
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("find refresh token", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_token(&row)?)),
            None => Ok(None),
        }
    }

    async fn revoke_refresh_token(
        &self,
        token_hash: &str,
        revoked_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        // Only a live row is touched; revoking an already-revoked, expired,
        // or absent token affects zero rows.
        let query = r#"
            UPDATE refresh_tokens
            SET revoked_at = $2
            WHERE token_hash = $1
              AND revoked_at IS NULL
              AND expired_at > $2
        "#;

        let result = sqlx::query(query)
            .bind(token_hash)
            .bind(revoked_at)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("revoke token", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_stale_tokens(&self, criteria: &SweepCriteria) -> Result<u64, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error("begin sweep transaction", e))?;

        // Both sweep clauses in one statement: past expiry, or revoked and
        // aged past the retention cutoff.
        let query = r#"
            DELETE FROM refresh_tokens
            WHERE expired_at < $1
               OR (revoked_at IS NOT NULL AND revoked_at < $2)
        "#;

        let result = sqlx::query(query)
            .bind(criteria.now)
            .bind(criteria.revoked_cutoff)
            .execute(&mut *tx)
            .await
            .map_err(|e| storage_error("delete stale tokens", e))?;

        tx.commit()
            .await
            .map_err(|e| storage_error("commit sweep transaction", e))?;

        Ok(result.rows_affected())
    }
}
