//! PostgreSQL integration tests for the repository implementations.
//!
//! These tests need a running PostgreSQL instance reachable through
//! `DATABASE_URL` (or the `POSTGRES_*` variables) and are ignored by
//! default; run them with `cargo test -p cb_infra -- --ignored`.

use chrono::{Duration, Utc};
use uuid::Uuid;

use cb_core::domain::entities::token::RefreshToken;
use cb_core::errors::DomainError;
use cb_core::repositories::{SweepCriteria, TokenRepository, UserRepository};
use cb_infra::{DatabasePool, PgTokenRepository, PgUserRepository};
use cb_shared::config::DatabaseConfig;

async fn setup() -> DatabasePool {
    let pool = DatabasePool::new(DatabaseConfig::from_env())
        .await
        .expect("database must be reachable");
    pool.run_migrations().await.expect("migrations must apply");
    pool
}

async fn create_owner(pool: &DatabasePool) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO users (id, email, password_hash, created_at) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind(format!("{}@example.com", id.simple()))
        .bind("unused-hash")
        .bind(Utc::now())
        .execute(pool.get_pool())
        .await
        .expect("user insert must succeed");
    id
}

fn unique_hash() -> String {
    Uuid::new_v4().simple().to_string()
}

#[tokio::test]
#[ignore]
async fn test_save_and_find_roundtrip() {
    let pool = setup().await;
    let repo = PgTokenRepository::new(pool.get_pool().clone());
    let owner = create_owner(&pool).await;

    let token = RefreshToken::new(owner, unique_hash(), Duration::days(7));
    let saved = repo.save_refresh_token(token.clone()).await.unwrap();
    assert_eq!(saved.id, token.id);

    let found = repo
        .find_refresh_token(&token.token_hash)
        .await
        .unwrap()
        .expect("row must exist");
    assert_eq!(found.id, token.id);
    assert_eq!(found.owner_id, owner);
    assert!(found.revoked_at.is_none());
    assert!(found.is_live());

    let missing = repo.find_refresh_token(&unique_hash()).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
#[ignore]
async fn test_duplicate_hash_is_a_storage_error() {
    let pool = setup().await;
    let repo = PgTokenRepository::new(pool.get_pool().clone());
    let owner = create_owner(&pool).await;

    let hash = unique_hash();
    let first = RefreshToken::new(owner, hash.clone(), Duration::days(7));
    let second = RefreshToken::new(owner, hash, Duration::days(7));

    repo.save_refresh_token(first).await.unwrap();
    let result = repo.save_refresh_token(second).await;

    assert!(matches!(result, Err(DomainError::Storage { .. })));
}

#[tokio::test]
#[ignore]
async fn test_revoke_touches_only_live_rows() {
    let pool = setup().await;
    let repo = PgTokenRepository::new(pool.get_pool().clone());
    let owner = create_owner(&pool).await;

    let token = RefreshToken::new(owner, unique_hash(), Duration::days(7));
    repo.save_refresh_token(token.clone()).await.unwrap();

    let now = Utc::now();
    assert!(repo.revoke_refresh_token(&token.token_hash, now).await.unwrap());
    // Second revocation affects zero rows
    assert!(!repo.revoke_refresh_token(&token.token_hash, now).await.unwrap());
    // Unknown hash is a no-op as well
    assert!(!repo.revoke_refresh_token(&unique_hash(), now).await.unwrap());

    let stored = repo
        .find_refresh_token(&token.token_hash)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.revoked_at.is_some());
}

#[tokio::test]
#[ignore]
async fn test_sweep_deletes_expired_and_stale_revoked_rows() {
    let pool = setup().await;
    let repo = PgTokenRepository::new(pool.get_pool().clone());
    let owner = create_owner(&pool).await;
    let now = Utc::now();

    let live = RefreshToken::new(owner, unique_hash(), Duration::days(7));

    let mut expired = RefreshToken::new(owner, unique_hash(), Duration::days(7));
    expired.issued_at = now - Duration::days(8);
    expired.expired_at = now - Duration::days(1);

    let mut recently_revoked = RefreshToken::new(owner, unique_hash(), Duration::days(30));
    recently_revoked.revoked_at = Some(now - Duration::days(1));

    let mut stale_revoked = RefreshToken::new(owner, unique_hash(), Duration::days(30));
    stale_revoked.revoked_at = Some(now - Duration::days(8));

    for token in [&live, &expired, &recently_revoked, &stale_revoked] {
        repo.save_refresh_token(token.clone()).await.unwrap();
    }

    let criteria = SweepCriteria::at(now, Duration::days(7));
    let deleted = repo.delete_stale_tokens(&criteria).await.unwrap();
    assert!(deleted >= 2);

    // Live and recently revoked rows survive; the others are gone
    assert!(repo.find_refresh_token(&live.token_hash).await.unwrap().is_some());
    assert!(repo
        .find_refresh_token(&recently_revoked.token_hash)
        .await
        .unwrap()
        .is_some());
    assert!(repo.find_refresh_token(&expired.token_hash).await.unwrap().is_none());
    assert!(repo
        .find_refresh_token(&stale_revoked.token_hash)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
#[ignore]
async fn test_user_lookup_by_email() {
    let pool = setup().await;
    let repo = PgUserRepository::new(pool.get_pool().clone());
    let owner = create_owner(&pool).await;

    let email = format!("{}@example.com", owner.simple());
    let user = repo.find_by_email(&email).await.unwrap().expect("user must exist");
    assert_eq!(user.id, owner);

    let missing = repo.find_by_email("missing@example.com").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
#[ignore]
async fn test_health_check_roundtrip() {
    let pool = setup().await;
    pool.health_check().await.expect("SELECT 1 must succeed");
}
