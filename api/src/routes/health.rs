use actix_web::{web, HttpResponse};

use cb_infra::DatabasePool;
use cb_shared::ErrorResponse;

/// Handler for GET /
///
/// Service banner.
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Contact Book Application v1.0"
    }))
}

/// Handler for GET /api/healthchecker
///
/// Verifies store connectivity with a `SELECT 1` round-trip.
pub async fn healthchecker(pool: web::Data<DatabasePool>) -> HttpResponse {
    match pool.health_check().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Database is healthy"
        })),
        Err(error) => {
            tracing::error!(error = %error, "health check failed");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "database_unreachable",
                "Database is not configured correctly",
            ))
        }
    }
}
