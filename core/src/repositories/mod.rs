//! Repository interfaces for entity persistence
//!
//! Concrete implementations live in the infrastructure layer; in-memory
//! mocks are provided here for tests.

pub mod token;
pub mod user;

pub use token::{MockTokenRepository, SweepCriteria, TokenRepository};
pub use user::{MockUserRepository, UserRepository};
