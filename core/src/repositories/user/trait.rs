//! User repository trait.
//!
//! Registration and profile management are out of scope for this service, so
//! the interface is lookup-only.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User lookup
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by login email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with the given email
    /// * `Err(DomainError::Storage)` - Lookup failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
}
