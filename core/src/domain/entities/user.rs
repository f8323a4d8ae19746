//! User entity for the authenticated principal.
//!
//! Only the fields login needs are modeled here; registration and profile
//! management live outside this service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated principal that refresh tokens are issued for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,

    /// Login email, unique per user
    pub email: String,

    /// bcrypt hash of the user's password
    pub password_hash: String,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user from an email and an already-hashed password
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }

    /// Verifies a plaintext password against the stored bcrypt hash
    pub fn verify_password(&self, password: &str) -> bool {
        bcrypt::verify(password, &self.password_hash).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_verification() {
        let hash = bcrypt::hash("hunter2", bcrypt::DEFAULT_COST).unwrap();
        let user = User::new("alice@example.com", hash);

        assert!(user.verify_password("hunter2"));
        assert!(!user.verify_password("hunter3"));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        let user = User::new("bob@example.com", "not-a-bcrypt-hash");
        assert!(!user.verify_password("anything"));
    }
}
