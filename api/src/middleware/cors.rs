//! CORS middleware configuration for cross-origin requests.
//!
//! The API serves browser clients from arbitrary origins, so the default
//! configuration is permissive. Deployments that want to pin origins can set
//! `ALLOWED_ORIGINS` to a comma-separated list.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use std::env;

/// Creates a CORS middleware instance for the current environment
pub fn create_cors() -> Cors {
    match env::var("ALLOWED_ORIGINS") {
        Ok(origins) => create_restricted_cors(&origins),
        Err(_) => Cors::permissive(),
    }
}

fn create_restricted_cors(origins: &str) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(3600);

    for origin in origins.split(',').map(str::trim).filter(|o| !o.is_empty()) {
        tracing::info!(origin, "allowing CORS origin");
        cors = cors.allowed_origin(origin);
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_permissive_cors_by_default() {
        env::remove_var("ALLOWED_ORIGINS");
        let _cors = create_cors();
    }

    #[test]
    fn test_create_restricted_cors() {
        let _cors = create_restricted_cors("https://app.example.com, https://admin.example.com");
    }
}
