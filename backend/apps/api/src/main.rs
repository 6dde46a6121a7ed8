//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use axum::{
    Router, http,
    http::{Method, header},
};
use config::ApiConfig;
use datecheck::{DateCheckConfig, DateTimeValidator, schedule_router};
use kernel::error::mapper::{ExceptionMapper, map_exceptions, panic_envelope};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Date validator
    let date_config = DateCheckConfig::from_env()?;
    let validator = DateTimeValidator::system(&date_config)?;
    tracing::info!(
        utc_offset_seconds = date_config.utc_offset_seconds,
        "Date validator ready"
    );

    let app = build_app(&config, validator);

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Assemble the `/api` router with error mapping, panic capture, tracing and CORS
fn build_app(config: &ApiConfig, validator: DateTimeValidator) -> Router {
    let mapper = Arc::new(ExceptionMapper::new());

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_credentials(true);

    Router::new()
        .nest("/api", schedule_router(validator))
        .layer(axum::middleware::from_fn_with_state(mapper, map_exceptions))
        .layer(CatchPanicLayer::custom(panic_envelope))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
