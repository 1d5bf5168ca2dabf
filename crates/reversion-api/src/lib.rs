//! # reversion-api: HTTP Service for Copyright Termination Eligibility
//!
//! Stateless Axum service over [`reversion_core`]. Every request carries all
//! of its inputs; the shared [`AppState`] holds only configuration, the
//! configured engine and the metrics registry.
//!
//! ## API Surface
//!
//! | Path                              | Module                   | Purpose |
//! |-----------------------------------|--------------------------|---------|
//! | `POST /v1/termination/eligibility`| [`routes::termination`]  | Windows, status, regime, guidance |
//! | `GET /v1/termination/regime`      | [`routes::termination`]  | Regime classification |
//! | `POST /v1/termination/schedule`   | [`routes::termination`]  | Statutory schedule |
//! | `GET /openapi.json`               | [`openapi`]              | OpenAPI document |
//! | `GET /health/liveness`            | here                     | Liveness probe |
//! | `GET /health/readiness`           | here                     | Readiness probe |
//! | `GET /metrics`                    | here                     | Prometheus scrape (when enabled) |
//!
//! Any other path answers 404 with the standard [`error::ErrorBody`].
//!
//! ## Middleware Stack
//!
//! ```text
//! Request → Cors → TraceLayer → Metrics → Handler
//! ```

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::Extension;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::error::AppError;
use crate::middleware::metrics::ApiMetrics;
pub use crate::state::{AppConfig, AppState};

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let metrics_on = state.config.metrics_enabled;
    let metrics = state.metrics.clone();
    let cors = middleware::cors::layer(&state.config.allowed_origins);

    let mut router = Router::new()
        .merge(routes::termination::router())
        .merge(openapi::router())
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .fallback(route_not_found);

    if metrics_on {
        router = router.route("/metrics", get(prometheus_metrics));
    }

    let mut router: Router = router.with_state(state);

    // Only register the metrics middleware when metrics are enabled.
    if metrics_on {
        router = router.layer(from_fn(middleware::metrics::metrics_middleware));
    }

    router
        .layer(middleware::tracing_layer::layer())
        .layer(cors)
        .layer(Extension(metrics))
}

/// GET /metrics: Prometheus metrics scrape endpoint.
async fn prometheus_metrics(
    Extension(metrics): Extension<ApiMetrics>,
) -> Result<Response, AppError> {
    let body = metrics.gather_and_encode().map_err(AppError::Internal)?;
    Ok((
        StatusCode::OK,
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        body,
    )
        .into_response())
}

/// Fallback for paths no router matched.
async fn route_not_found() -> AppError {
    AppError::NotFound("route not found".to_string())
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe. The service has no backing stores, so it is ready as
/// soon as it is serving.
async fn readiness() -> &'static str {
    "ready"
}
