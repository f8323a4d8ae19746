//! Mock implementation of TokenRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

use super::sweep::SweepCriteria;
use super::r#trait::TokenRepository;

/// In-memory token repository for tests, keyed by token hash
pub struct MockTokenRepository {
    tokens: Arc<RwLock<HashMap<String, RefreshToken>>>,
    /// When set, every operation fails with a storage error
    fail: Arc<RwLock<bool>>,
}

impl MockTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
            fail: Arc::new(RwLock::new(false)),
        }
    }

    /// Make every subsequent operation fail, simulating a store outage
    pub async fn set_failing(&self, failing: bool) {
        *self.fail.write().await = failing;
    }

    /// Number of rows currently held
    pub async fn count(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// Insert a row directly, bypassing issuance (for shaping test fixtures)
    pub async fn insert(&self, token: RefreshToken) {
        self.tokens
            .write()
            .await
            .insert(token.token_hash.clone(), token);
    }

    async fn check_available(&self) -> Result<(), DomainError> {
        if *self.fail.read().await {
            return Err(DomainError::Storage {
                message: "simulated storage failure".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        self.check_available().await?;
        let mut tokens = self.tokens.write().await;

        if tokens.contains_key(&token.token_hash) {
            return Err(DomainError::Storage {
                message: "duplicate token hash".to_string(),
            });
        }

        tokens.insert(token.token_hash.clone(), token.clone());
        Ok(token)
    }

    async fn find_refresh_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshToken>, DomainError> {
        self.check_available().await?;
        let tokens = self.tokens.read().await;
        Ok(tokens.get(token_hash).cloned())
    }

    async fn revoke_refresh_token(
        &self,
        token_hash: &str,
        revoked_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        self.check_available().await?;
        let mut tokens = self.tokens.write().await;

        if let Some(token) = tokens.get_mut(token_hash) {
            if token.is_live_at(revoked_at) {
                token.revoke_at(revoked_at);
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn delete_stale_tokens(&self, criteria: &SweepCriteria) -> Result<u64, DomainError> {
        self.check_available().await?;
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();

        tokens.retain(|_, token| !criteria.matches(token));

        Ok((before - tokens.len()) as u64)
    }
}
