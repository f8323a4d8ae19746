//! Business entities for the authentication domain

pub mod token;
pub mod user;

pub use token::{Claims, RefreshToken, TokenPair};
pub use user::User;
