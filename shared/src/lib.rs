//! Shared utilities and common types for the contact book server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from environment variables
//! - Response structures shared between layers

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{AppConfig, DatabaseConfig, JwtConfig, ServerConfig, SweepConfig};
pub use types::ErrorResponse;
