//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims structure for the JWT access-token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (owner ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates new claims for an access token
    ///
    /// # Arguments
    ///
    /// * `owner_id` - The authenticated principal's UUID
    /// * `issuer` - Issuer claim value
    /// * `lifetime` - How long the access token stays valid
    pub fn new_access_token(owner_id: Uuid, issuer: &str, lifetime: Duration) -> Self {
        let now = Utc::now();
        let expiry = now + lifetime;

        Self {
            sub: owner_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the owner ID from the claims
    pub fn owner_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Refresh token entity stored in the database
///
/// A row is *live* while `revoked_at` is unset and the expiry instant has not
/// been reached. Rows stay in the store for a while after losing liveness so
/// recently revoked tokens remain inspectable; the background sweeper deletes
/// them once they age past the retention window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Unique identifier for the refresh token
    pub id: Uuid,

    /// Principal this token belongs to
    pub owner_id: Uuid,

    /// SHA-256 digest of the token value; the raw credential is never stored
    pub token_hash: String,

    /// Timestamp when the token was created
    pub issued_at: DateTime<Utc>,

    /// Absolute expiry; the token is invalid for use at or after this instant
    pub expired_at: DateTime<Utc>,

    /// Set when the token was explicitly invalidated before natural expiry
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    /// Creates a new refresh token row
    ///
    /// `lifetime` must be positive so that `expired_at > issued_at` holds.
    pub fn new(owner_id: Uuid, token_hash: String, lifetime: Duration) -> Self {
        debug_assert!(lifetime > Duration::zero());
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            owner_id,
            token_hash,
            issued_at: now,
            expired_at: now + lifetime,
            revoked_at: None,
        }
    }

    /// Checks whether the token is past its expiry at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expired_at
    }

    /// Checks whether the token is live at the given instant
    ///
    /// Live means not revoked and strictly before the expiry instant. Callers
    /// that make several checks against one token should read `now` once and
    /// pass it in, so the decision is taken against a single snapshot.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && now < self.expired_at
    }

    /// Checks whether the token is live right now
    pub fn is_live(&self) -> bool {
        self.is_live_at(Utc::now())
    }

    /// Revokes the token at the given instant if it is currently live
    ///
    /// Revoking an already-revoked or expired token is a no-op; the original
    /// revocation timestamp is preserved.
    pub fn revoke_at(&mut self, now: DateTime<Utc>) {
        if self.is_live_at(now) {
            self.revoked_at = Some(now);
        }
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// Opaque refresh token value
    pub refresh_token: String,

    /// Token type for the Authorization header
    pub token_type: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair with expiry metadata
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: String::from("bearer"),
            access_expires_in,
            refresh_expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_claims() {
        let owner_id = Uuid::new_v4();
        let claims = Claims::new_access_token(owner_id, "contact-book", Duration::minutes(30));

        assert_eq!(claims.sub, owner_id.to_string());
        assert_eq!(claims.iss, "contact-book");
        assert!(!claims.is_expired());
        assert_eq!(claims.owner_id().unwrap(), owner_id);
    }

    #[test]
    fn test_claims_expiration() {
        let mut claims =
            Claims::new_access_token(Uuid::new_v4(), "contact-book", Duration::minutes(30));
        claims.exp = Utc::now().timestamp() - 1;

        assert!(claims.is_expired());
    }

    #[test]
    fn test_refresh_token_creation() {
        let owner_id = Uuid::new_v4();
        let token = RefreshToken::new(owner_id, "hash".to_string(), Duration::days(7));

        assert_eq!(token.owner_id, owner_id);
        assert!(token.revoked_at.is_none());
        assert!(token.expired_at > token.issued_at);
        assert!(token.is_live());
    }

    #[test]
    fn test_refresh_token_liveness_snapshot() {
        let token = RefreshToken::new(Uuid::new_v4(), "hash".to_string(), Duration::days(7));

        let before_expiry = token.expired_at - Duration::seconds(1);
        let at_expiry = token.expired_at;
        let after_expiry = token.expired_at + Duration::seconds(1);

        assert!(token.is_live_at(before_expiry));
        // Invalid for use at or after the expiry instant
        assert!(!token.is_live_at(at_expiry));
        assert!(!token.is_live_at(after_expiry));
    }

    #[test]
    fn test_refresh_token_revocation() {
        let mut token = RefreshToken::new(Uuid::new_v4(), "hash".to_string(), Duration::days(7));
        let now = Utc::now();

        token.revoke_at(now);
        assert_eq!(token.revoked_at, Some(now));
        assert!(!token.is_live_at(now));
    }

    #[test]
    fn test_refresh_token_revocation_is_idempotent() {
        let mut token = RefreshToken::new(Uuid::new_v4(), "hash".to_string(), Duration::days(7));
        let first = Utc::now();

        token.revoke_at(first);
        token.revoke_at(first + Duration::minutes(5));

        // First revocation timestamp wins
        assert_eq!(token.revoked_at, Some(first));
    }

    #[test]
    fn test_revoking_expired_token_is_noop() {
        let mut token = RefreshToken::new(Uuid::new_v4(), "hash".to_string(), Duration::days(7));
        let after_expiry = token.expired_at + Duration::hours(1);

        token.revoke_at(after_expiry);
        assert!(token.revoked_at.is_none());
    }

    #[test]
    fn test_token_pair_creation() {
        let pair = TokenPair::new(
            "access_token_jwt".to_string(),
            "refresh_token_value".to_string(),
            30 * 60,
            7 * 24 * 60 * 60,
        );

        assert_eq!(pair.token_type, "bearer");
        assert_eq!(pair.access_expires_in, 1800);
        assert_eq!(pair.refresh_expires_in, 604800);
    }

    #[test]
    fn test_token_pair_serialization() {
        let pair = TokenPair::new("access".to_string(), "refresh".to_string(), 1800, 604800);

        let json = serde_json::to_string(&pair).unwrap();
        let deserialized: TokenPair = serde_json::from_str(&json).unwrap();

        assert_eq!(pair, deserialized);
    }
}
