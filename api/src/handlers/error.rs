//! Mapping of domain errors onto HTTP responses.
//!
//! Every token failure maps to the same opaque 401 body; the response never
//! distinguishes a missing token from a revoked or expired one. Storage and
//! internal failures are logged here and surface as a generic 500.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use tracing::error;
use validator::ValidationErrors;

use cb_core::errors::{AuthError, DomainError, TokenError};
use cb_shared::ErrorResponse;

/// Convert a domain error into the standard JSON error response
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(AuthError::InvalidCredentials) => error_response(
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            "Invalid email or password",
        ),
        DomainError::Token(TokenError::InvalidToken) => error_response(
            StatusCode::UNAUTHORIZED,
            "invalid_token",
            "Invalid refresh token",
        ),
        DomainError::Storage { message } => {
            error!(error = %message, "storage failure while handling request");
            internal_error()
        }
        DomainError::Internal { message } => {
            error!(error = %message, "internal failure while handling request");
            internal_error()
        }
    }
}

/// 400 response for a request body that failed validation
pub fn handle_validation_errors(errors: &ValidationErrors) -> HttpResponse {
    error_response(
        StatusCode::BAD_REQUEST,
        "validation_error",
        &format!("Request validation failed: {}", errors),
    )
}

fn internal_error() -> HttpResponse {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        "An internal error occurred",
    )
}

fn error_response(status: StatusCode, code: &str, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse::new(code, message))
}
