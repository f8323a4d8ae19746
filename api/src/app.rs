//! Application state and factory
//!
//! This module handles the initialization of the application state and
//! provides the factory for creating the actix-web application.

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use crate::middleware::cors::create_cors;
use crate::routes::auth::{login, logout, refresh};
use crate::routes::health::{healthchecker, index};

use cb_core::repositories::{TokenRepository, UserRepository};
use cb_core::services::AuthService;
use cb_shared::ErrorResponse;

/// Shared services available to the route handlers
pub struct AppState<U: UserRepository, T: TokenRepository> {
    pub auth_service: Arc<AuthService<U, T>>,
}

/// Create and configure the application
///
/// The `/api/healthchecker` route additionally expects a
/// `web::Data<DatabasePool>` to be registered on the app; the binary adds it
/// after this factory returns, tests that never hit the route can omit it.
pub fn create_app<U, T>(
    app_state: web::Data<AppState<U, T>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<
            actix_web::body::EitherBody<tracing_actix_web::StreamSpan<actix_web::body::BoxBody>>,
        >,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    App::new()
        .app_data(app_state)
        .wrap(TracingLogger::default())
        .wrap(create_cors())
        .route("/", web::get().to(index))
        .service(
            web::scope("/api")
                .route("/healthchecker", web::get().to(healthchecker))
                .service(
                    web::scope("/auth")
                        .route("/login", web::post().to(login::<U, T>))
                        .route("/refresh", web::post().to(refresh::<U, T>))
                        .route("/logout", web::post().to(logout::<U, T>)),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "not_found",
        "The requested resource was not found",
    ))
}
