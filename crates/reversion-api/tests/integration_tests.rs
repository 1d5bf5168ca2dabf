//! # Integration Tests for reversion-api
//!
//! Drives the fully assembled router: health probes, termination endpoints,
//! error mapping, CORS allow-list, Prometheus scrape and the OpenAPI document.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use reversion_api::state::{AppConfig, AppState};
use reversion_core::LeapDayPolicy;

/// Helper: build the test app with the default configuration.
fn test_app() -> axum::Router {
    reversion_api::app(AppState::new())
}

/// Helper: build the test app with a custom configuration.
fn test_app_with_config(config: AppConfig) -> axum::Router {
    reversion_api::app(AppState::with_config(config))
}

/// Helper: read response body as string.
async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Helper: read response body as JSON.
async fn body_json(response: axum::http::Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let response = test_app().oneshot(get("/health/liveness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_probe() {
    let response = test_app().oneshot(get("/health/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

// -- Termination Eligibility --------------------------------------------------

#[tokio::test]
async fn test_eligibility_full_response_shape() {
    let response = test_app()
        .oneshot(post_json(
            "/v1/termination/eligibility",
            r#"{"release_date":"1990-01-01","includes_publication_right":true,"as_of":"2010-01-01"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["termination_start"], "2025-01-01");
    assert_eq!(body["termination_end"], "2030-01-01");
    assert_eq!(body["notice_start"], "2015-01-01");
    assert_eq!(body["notice_end"], "2028-01-01");
    assert_eq!(body["status"], "too_early");
    assert_eq!(body["regime"]["regime"], "section203");
    assert_eq!(
        body["regime"]["description"],
        "Works published on or after January 1, 1978"
    );
    assert_eq!(body["guidance"]["headline"], "Cannot Serve Notice Yet");
    assert_eq!(
        body["guidance"]["call_to_action"]["label"],
        "Set Calendar Reminder"
    );
    assert_eq!(body["as_of"], "2010-01-01");
}

#[tokio::test]
async fn test_pre_1978_work_uses_uniform_arithmetic() {
    let response = test_app()
        .oneshot(post_json(
            "/v1/termination/eligibility",
            r#"{"release_date":"1965-01-01","as_of":"2020-01-01"}"#,
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["termination_start"], "2000-01-01");
    assert_eq!(body["regime"]["label"], "Section 304");
    assert_eq!(body["status"], "expired");
}

#[tokio::test]
async fn test_eligibility_without_as_of_uses_today() {
    let response = test_app()
        .oneshot(post_json(
            "/v1/termination/eligibility",
            r#"{"release_date":"1990-01-01"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["as_of"],
        reversion_core::CalendarDate::today().to_iso8601()
    );
}

#[tokio::test]
async fn test_leap_day_policy_is_configurable() {
    let request = r#"{"release_date":"1988-02-29","as_of":"2000-01-01"}"#;

    let roll = test_app()
        .oneshot(post_json("/v1/termination/eligibility", request))
        .await
        .unwrap();
    let body = body_json(roll).await;
    assert_eq!(body["termination_start"], "2023-03-01");
    assert_eq!(body["notice_start"], "2013-03-01");
    assert_eq!(body["notice_end"], "2026-03-01");

    let clamp = test_app_with_config(AppConfig {
        leap_day_policy: LeapDayPolicy::ClampToFebruary28,
        ..AppConfig::default()
    })
    .oneshot(post_json("/v1/termination/eligibility", request))
    .await
    .unwrap();
    assert_eq!(body_json(clamp).await["termination_start"], "2023-02-28");
}

// -- Error Mapping ------------------------------------------------------------

#[tokio::test]
async fn test_invalid_date_returns_validation_error() {
    let response = test_app()
        .oneshot(post_json(
            "/v1/termination/eligibility",
            r#"{"release_date":"1990-02-30"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_json_returns_bad_request() {
    let response = test_app()
        .oneshot(post_json("/v1/termination/eligibility", "{not json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_invalid_as_of_returns_validation_error() {
    let response = test_app()
        .oneshot(post_json(
            "/v1/termination/schedule",
            r#"{"release_date":"1990-01-01","as_of":"yesterday"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("yesterday"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let response = test_app().oneshot(get("/v1/unknown")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "not found: route not found");
}

// -- CORS ---------------------------------------------------------------------

fn preflight(origin: &str) -> Request<Body> {
    Request::builder()
        .method("OPTIONS")
        .uri("/v1/termination/eligibility")
        .header("origin", origin)
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_cors_allows_listed_origin() {
    let response = test_app()
        .oneshot(preflight("https://tools.musicadmin.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "https://tools.musicadmin.com"
    );
}

#[tokio::test]
async fn test_cors_ignores_unlisted_origin() {
    let response = test_app()
        .oneshot(preflight("https://evil.example"))
        .await
        .unwrap();
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}

#[tokio::test]
async fn test_cors_uses_configured_origins() {
    let app = test_app_with_config(AppConfig {
        allowed_origins: vec!["https://a.example".to_string()],
        ..AppConfig::default()
    });
    let response = app
        .clone()
        .oneshot(preflight("https://a.example"))
        .await
        .unwrap();
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "https://a.example"
    );
    let response = app
        .oneshot(preflight("https://tools.musicadmin.com"))
        .await
        .unwrap();
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}

// -- Metrics ------------------------------------------------------------------

#[tokio::test]
async fn test_metrics_scrape_reports_requests_and_evaluations() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(post_json(
            "/v1/termination/eligibility",
            r#"{"release_date":"1990-01-01","as_of":"2020-01-01"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("reversion_http_requests_total"));
    assert!(body.contains("/v1/termination/eligibility"));
    assert!(body.contains("reversion_evaluations_total"));
    assert!(body.contains("can_serve"));
}

#[tokio::test]
async fn test_metrics_disabled_hides_endpoint() {
    let app = test_app_with_config(AppConfig {
        metrics_enabled: false,
        ..AppConfig::default()
    });
    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// -- OpenAPI ------------------------------------------------------------------

#[tokio::test]
async fn test_openapi_document_served() {
    let response = test_app().oneshot(get("/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"]["/v1/termination/eligibility"].is_object());
    assert!(body["paths"]["/v1/termination/schedule"].is_object());
}
