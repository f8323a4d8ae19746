//! Authentication route handlers
//!
//! This module contains the authentication endpoints:
//! - Login with email and password
//! - Token refresh (rotation)
//! - Logout

pub mod login;
pub mod logout;
pub mod refresh;

pub use login::login;
pub use logout::logout;
pub use refresh::refresh;
