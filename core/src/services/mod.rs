//! Business services orchestrating entities and repositories

pub mod auth;
pub mod token;

pub use auth::AuthService;
pub use token::{SweepOutcome, SweeperConfig, TokenService, TokenServiceConfig, TokenSweeper};
