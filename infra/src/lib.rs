//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the contact book
//! backend: concrete PostgreSQL implementations of the repository traits
//! defined in `cb_core`, connection pool management, and embedded schema
//! migrations.

pub mod database;

pub use database::{DatabasePool, PgTokenRepository, PgUserRepository};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
