//! CORS middleware configuration for cross-origin requests.
//!
//! The student web client is served from a different origin than the API.
//! Development accepts any origin; other environments accept only the
//! origins listed in `CORS_ALLOWED_ORIGINS`.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use ck_shared::config::CorsConfig;

/// Creates a CORS middleware instance from configuration.
///
/// Preflight `OPTIONS` requests are answered here and never reach the
/// route handlers.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let cors = if config.allow_any_origin {
        tracing::info!("Configuring permissive CORS (any origin)");
        Cors::default().allow_any_origin()
    } else {
        tracing::info!(
            origins = ?config.allowed_origins,
            "Configuring CORS for allowed origins"
        );
        config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(config.max_age)
}
