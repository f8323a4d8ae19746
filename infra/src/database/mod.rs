//! Database module - PostgreSQL implementations using SQLx
//!
//! This module provides the database access layer:
//! - Connection pool management
//! - Repository pattern implementations
//! - Embedded schema migrations

pub mod connection;
pub mod postgres;

pub use connection::DatabasePool;
pub use postgres::{PgTokenRepository, PgUserRepository};
