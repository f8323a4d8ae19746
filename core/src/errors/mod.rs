//! Domain-specific error types and error handling.
//!
//! Token failures collapse into a single opaque variant on purpose: callers
//! must not be able to tell a missing token from a revoked or expired one.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    /// Presented refresh token is missing, expired, or revoked
    #[error("Invalid refresh token")]
    InvalidToken,
}

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    /// Connectivity, constraint, or timeout failure in the store
    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

pub type DomainResult<T> = Result<T, DomainError>;
