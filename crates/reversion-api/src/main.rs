//! # reversion-api: Binary Entry Point
//!
//! Starts the Axum HTTP server for the termination eligibility API.
//! Binds to `0.0.0.0` on the configured port (default 8080).

use reversion_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Invalid configuration: {e}");
        e
    })?;
    tracing::info!(
        port = config.port,
        origins = config.allowed_origins.len(),
        metrics = config.metrics_enabled,
        leap_day_policy = %config.leap_day_policy,
        "configuration loaded"
    );

    let port = config.port;
    let app = reversion_api::app(AppState::with_config(config));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Reversion API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Structured logging from `RUST_LOG` (default `info`); JSON lines when
/// `REVERSION_LOG_FORMAT=json`.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let json = std::env::var("REVERSION_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
