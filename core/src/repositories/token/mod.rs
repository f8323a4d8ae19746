//! Refresh token persistence interface

mod mock;
mod sweep;
mod r#trait;

pub use mock::MockTokenRepository;
pub use sweep::SweepCriteria;
pub use r#trait::TokenRepository;
