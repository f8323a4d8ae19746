//! Unit tests for the token service

use chrono::{Duration, Utc};
use rand::Rng;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::{DomainError, TokenError};
use crate::repositories::{MockTokenRepository, TokenRepository};
use crate::services::token::{hash_token, TokenService, TokenServiceConfig};

fn create_test_service() -> (Arc<MockTokenRepository>, TokenService<MockTokenRepository>) {
    let repository = Arc::new(MockTokenRepository::new());
    let service = TokenService::new(Arc::clone(&repository), TokenServiceConfig::default());
    (repository, service)
}

#[tokio::test]
async fn test_issue_tokens() {
    let (repository, service) = create_test_service();
    let owner_id = Uuid::new_v4();

    let pair = service.issue_tokens(owner_id).await.unwrap();

    assert!(!pair.access_token.is_empty());
    assert!(!pair.refresh_token.is_empty());
    assert_eq!(pair.access_expires_in, 30 * 60);
    assert_eq!(pair.refresh_expires_in, 7 * 24 * 60 * 60);
    // Exactly one new row per issuance
    assert_eq!(repository.count().await, 1);
}

#[tokio::test]
async fn test_issue_stores_digest_not_credential() {
    let (repository, service) = create_test_service();

    let pair = service.issue_tokens(Uuid::new_v4()).await.unwrap();

    assert!(repository
        .find_refresh_token(&pair.refresh_token)
        .await
        .unwrap()
        .is_none());
    assert!(repository
        .find_refresh_token(&hash_token(&pair.refresh_token))
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_issue_then_validate_returns_owner() {
    let (_repository, service) = create_test_service();
    let owner_id = Uuid::new_v4();

    let pair = service.issue_tokens(owner_id).await.unwrap();
    let validated = service.validate_refresh(&pair.refresh_token).await.unwrap();

    assert_eq!(validated, owner_id);
}

#[tokio::test]
async fn test_validate_unknown_token() {
    let (_repository, service) = create_test_service();

    let result = service.validate_refresh("no-such-token").await;

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidToken))
    ));
}

#[tokio::test]
async fn test_issue_revoke_validate_fails() {
    let (_repository, service) = create_test_service();
    let pair = service.issue_tokens(Uuid::new_v4()).await.unwrap();

    service
        .revoke_refresh_token(&pair.refresh_token)
        .await
        .unwrap();
    let result = service.validate_refresh(&pair.refresh_token).await;

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidToken))
    ));
}

#[tokio::test]
async fn test_validate_expired_token_fails() {
    let (repository, service) = create_test_service();
    let owner_id = Uuid::new_v4();

    // Row whose expiry instant is already in the past
    let mut record = RefreshToken::new(owner_id, hash_token("stale"), Duration::days(7));
    record.expired_at = Utc::now() - Duration::seconds(1);
    repository.insert(record).await;

    let result = service.validate_refresh("stale").await;

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidToken))
    ));
}

#[tokio::test]
async fn test_revoke_is_idempotent() {
    let (repository, service) = create_test_service();
    let pair = service.issue_tokens(Uuid::new_v4()).await.unwrap();
    let token_hash = hash_token(&pair.refresh_token);

    service
        .revoke_refresh_token(&pair.refresh_token)
        .await
        .unwrap();
    let first_state = repository
        .find_refresh_token(&token_hash)
        .await
        .unwrap()
        .unwrap();

    // Second revocation: no error, no state change
    service
        .revoke_refresh_token(&pair.refresh_token)
        .await
        .unwrap();
    let second_state = repository
        .find_refresh_token(&token_hash)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(first_state, second_state);
}

#[tokio::test]
async fn test_revoke_unknown_token_is_noop() {
    let (_repository, service) = create_test_service();

    assert!(service.revoke_refresh_token("never-issued").await.is_ok());
}

#[tokio::test]
async fn test_validate_has_no_side_effect() {
    let (repository, service) = create_test_service();
    let pair = service.issue_tokens(Uuid::new_v4()).await.unwrap();
    let token_hash = hash_token(&pair.refresh_token);

    let before = repository
        .find_refresh_token(&token_hash)
        .await
        .unwrap()
        .unwrap();
    service.validate_refresh(&pair.refresh_token).await.unwrap();
    let after = repository
        .find_refresh_token(&token_hash)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(before, after);
}

#[tokio::test]
async fn test_concurrent_issues_are_independent() {
    let repository = Arc::new(MockTokenRepository::new());
    let service = Arc::new(TokenService::new(
        Arc::clone(&repository),
        TokenServiceConfig::default(),
    ));
    let owner_id = Uuid::new_v4();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.issue_tokens(owner_id).await })
        })
        .collect();

    let mut refresh_tokens = Vec::new();
    for handle in handles {
        let pair = handle.await.unwrap().unwrap();
        refresh_tokens.push(pair.refresh_token);
    }

    // All credentials distinct, one row each
    let mut deduped = refresh_tokens.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), 8);
    assert_eq!(repository.count().await, 8);

    // Validating one token leaves every other token valid
    service.validate_refresh(&refresh_tokens[0]).await.unwrap();
    for token in &refresh_tokens {
        assert_eq!(service.validate_refresh(token).await.unwrap(), owner_id);
    }
}

#[tokio::test]
async fn test_validate_matches_liveness_over_random_rows() {
    let (repository, service) = create_test_service();
    let mut rng = rand::thread_rng();

    for i in 0..50 {
        let value = format!("token-{}", i);
        let mut record =
            RefreshToken::new(Uuid::new_v4(), hash_token(&value), Duration::days(7));

        // Expiry somewhere in (-3d, +3d), keeping a minute of slack around
        // "now" so the assertion cannot race the clock.
        let offset_secs = rng.gen_range(60..259_200) * if rng.gen_bool(0.5) { 1 } else { -1 };
        record.expired_at = Utc::now() + Duration::seconds(offset_secs);
        if rng.gen_bool(0.4) {
            record.revoked_at = Some(Utc::now() - Duration::seconds(rng.gen_range(0..86_400)));
        }

        let expect_valid = record.revoked_at.is_none() && offset_secs > 0;
        repository.insert(record).await;

        let result = service.validate_refresh(&value).await;
        assert_eq!(
            result.is_ok(),
            expect_valid,
            "row {} (expiry offset {}s) validated unexpectedly",
            i,
            offset_secs
        );
    }
}

#[tokio::test]
async fn test_verify_access_token_roundtrip() {
    let (_repository, service) = create_test_service();
    let owner_id = Uuid::new_v4();

    let pair = service.issue_tokens(owner_id).await.unwrap();
    let claims = service.verify_access_token(&pair.access_token).unwrap();

    assert_eq!(claims.owner_id().unwrap(), owner_id);
    assert_eq!(claims.iss, "contact-book");
}

#[tokio::test]
async fn test_verify_invalid_access_token() {
    let (_repository, service) = create_test_service();

    let result = service.verify_access_token("not-a-jwt");

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidToken))
    ));
}

#[tokio::test]
async fn test_issue_surfaces_storage_failure() {
    let (repository, service) = create_test_service();
    repository.set_failing(true).await;

    let result = service.issue_tokens(Uuid::new_v4()).await;

    assert!(matches!(result, Err(DomainError::Storage { .. })));
}
