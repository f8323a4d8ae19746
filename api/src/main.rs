//! Contact book API server binary.
//!
//! Wires the PostgreSQL repositories, token and auth services, and the
//! background token sweeper together, then serves the HTTP surface until
//! the process is asked to shut down.

use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cb_api::app::{create_app, AppState};
use cb_core::services::{AuthService, SweeperConfig, TokenService, TokenServiceConfig, TokenSweeper};
use cb_infra::{DatabasePool, PgTokenRepository, PgUserRepository};
use cb_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    if config.jwt.is_using_default_secret() {
        warn!("SECRET_KEY is not set; using the built-in development secret");
    }

    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("failed to create database pool")?;
    pool.run_migrations()
        .await
        .context("failed to run database migrations")?;

    let user_repository = Arc::new(PgUserRepository::new(pool.get_pool().clone()));
    let token_repository = Arc::new(PgTokenRepository::new(pool.get_pool().clone()));

    let token_service = Arc::new(TokenService::new(
        Arc::clone(&token_repository),
        TokenServiceConfig::from(&config.jwt),
    ));
    let auth_service = Arc::new(AuthService::new(user_repository, token_service));

    // The sweeper is owned here, started once, and stopped after the server
    // exits; nothing else holds a handle to it.
    let mut sweeper = TokenSweeper::new(
        Arc::clone(&token_repository),
        SweeperConfig::from(&config.sweep),
    );
    sweeper.start();

    let app_state = web::Data::new(AppState { auth_service });
    let pool_data = web::Data::new(pool.clone());

    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "starting contact book API server");

    let mut server = HttpServer::new(move || {
        create_app(app_state.clone()).app_data(pool_data.clone())
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    // No new sweep is scheduled past this point; an in-flight sweep finishes
    // (commits or rolls back) before stop returns.
    sweeper.stop().await;
    pool.close().await;

    info!("server shut down");
    Ok(())
}
