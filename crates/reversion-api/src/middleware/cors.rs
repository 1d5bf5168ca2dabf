//! # CORS
//!
//! Browser callers are limited to the configured origin allow-list.
//! Only `GET`, `POST` and preflight `OPTIONS` are allowed, with the
//! `Content-Type` request header.

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Build the CORS layer for `origins`.
///
/// Origins that are not valid header values are skipped with a warning.
/// An empty list rejects every cross-origin request.
pub fn layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(%origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    tracing::debug!(count = allowed.len(), "CORS allow-list configured");

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
