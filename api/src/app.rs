//! Application factory
//!
//! Builds the actix-web `App` with state, middleware and routes so that
//! `main` and the integration tests run exactly the same wiring.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error, HttpResponse,
};

use ck_core::{EmailServiceTrait, OtpStoreTrait};
use ck_shared::ServerConfig;

use crate::handlers::{method_not_allowed, not_found};
use crate::middleware::cors::create_cors;
use crate::routes::otp::{issue_otp, verify_otp, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<S, E>(
    app_state: web::Data<AppState<S, E>>,
    server: &ServerConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    S: OtpStoreTrait + 'static,
    E: EmailServiceTrait + ?Sized + 'static,
{
    let json_config = web::JsonConfig::default().limit(server.max_payload_size);

    App::new()
        // Add application state
        .app_data(app_state)
        .app_data(json_config)
        // Add middleware (CORS answers preflights before routing)
        .wrap(create_cors(&server.cors))
        .wrap(Logger::default())
        // Health check endpoint
        .route("/health", web::get().to(health_check::<S, E>))
        .service(
            web::scope("/api")
                .service(
                    web::resource("/issue-otp")
                        .route(web::post().to(issue_otp::<S, E>))
                        .default_service(web::route().to(method_not_allowed)),
                )
                .service(
                    web::resource("/verify-otp")
                        .route(web::post().to(verify_otp::<S, E>))
                        .default_service(web::route().to(method_not_allowed)),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check<S, E>(state: web::Data<AppState<S, E>>) -> HttpResponse
where
    S: OtpStoreTrait + 'static,
    E: EmailServiceTrait + ?Sized + 'static,
{
    match state.otp_service.pending_count().await {
        Ok(pending) => HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "service": "campus-konnect-otp",
            "version": env!("CARGO_PKG_VERSION"),
            "pending_otps": pending,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
        Err(e) => {
            tracing::error!(error = %e, "Health check could not read the OTP store");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "service": "campus-konnect-otp",
                "version": env!("CARGO_PKG_VERSION"),
                "timestamp": chrono::Utc::now().to_rfc3339(),
            }))
        }
    }
}
