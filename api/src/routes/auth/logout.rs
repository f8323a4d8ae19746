use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::auth::{LogoutRequest, LogoutResponse};
use crate::handlers::error::handle_domain_error;

use cb_core::repositories::{TokenRepository, UserRepository};

/// Handler for POST /api/auth/logout
///
/// Revokes the presented refresh token. Revoking a token that is already
/// revoked, expired, or unknown still returns 200, so the endpoint can be
/// retried freely and reveals nothing about which tokens exist.
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
///     "message": "Logged out successfully"
/// }
/// ```
///
/// ## Errors
/// - 500 Internal Server Error: Storage failure
pub async fn logout<U, T>(
    state: web::Data<AppState<U, T>>,
    request: web::Json<LogoutRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    match state.auth_service.logout(&request.refresh_token).await {
        Ok(()) => HttpResponse::Ok().json(LogoutResponse {
            message: "Logged out successfully".to_string(),
        }),
        Err(error) => handle_domain_error(&error),
    }
}
