use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;

use ck_api::app::create_app;
use ck_api::routes::otp::AppState;
use ck_api::telemetry::init_tracing;
use ck_core::{Clock, OtpService, SystemClock};
use ck_infra::{spawn_sweeper, InfrastructureServices};
use ck_shared::{AppConfig, Environment};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables; a missing file is fine
    let environment = Environment::from_env();
    dotenvy::from_filename(environment.env_file())
        .or_else(|_| dotenvy::dotenv())
        .ok();

    let config = AppConfig::from_env().context("Invalid configuration")?;
    init_tracing(&config.logging)?;

    tracing::info!(
        environment = %config.environment,
        "Starting Campus Konnect OTP service"
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let infra = InfrastructureServices::initialize(&config, clock.clone())
        .context("Failed to initialize infrastructure")?;

    let sweeper = config.store.sweep_interval_secs.map(|secs| {
        spawn_sweeper(
            infra.store.clone(),
            clock.clone(),
            std::time::Duration::from_secs(secs),
        )
    });

    let otp_service = Arc::new(OtpService::new(
        infra.store.clone(),
        infra.email_service.clone(),
        clock,
    ));
    let app_state = web::Data::new(AppState::new(otp_service));

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind");

    let server_config = config.server.clone();
    let mut server = HttpServer::new(move || create_app(app_state.clone(), &server_config));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("HTTP server error")?;

    if let Some(handle) = sweeper {
        handle.abort();
    }

    tracing::info!("Server stopped");
    Ok(())
}
