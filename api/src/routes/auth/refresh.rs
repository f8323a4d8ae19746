use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::auth::{AuthResponse, RefreshTokenRequest};
use crate::handlers::error::handle_domain_error;

use cb_core::repositories::{TokenRepository, UserRepository};

/// Handler for POST /api/auth/refresh
///
/// Exchanges a live refresh token for a new token pair. The presented token
/// is retired in the process; each refresh hands out a fresh credential.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "string"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "new opaque string",
///     "token_type": "bearer",
///     "expires_in": 1800
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Unknown, expired, or revoked refresh token
/// - 500 Internal Server Error: Storage failure
pub async fn refresh<U, T>(
    state: web::Data<AppState<U, T>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    match state.auth_service.refresh(&request.refresh_token).await {
        Ok(pair) => HttpResponse::Ok().json(AuthResponse::from(pair)),
        Err(error) => handle_domain_error(&error),
    }
}
