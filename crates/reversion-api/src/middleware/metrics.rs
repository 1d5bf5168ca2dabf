//! # Prometheus Metrics
//!
//! Request metrics (count, latency, errors) are recorded by
//! [`metrics_middleware`]. Evaluation outcomes are counted per status by the
//! termination handlers. Everything lives in a per-instance [`Registry`], so
//! parallel tests never share counters.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use prometheus::{
    core::Collector, Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry,
    TextEncoder,
};
use reversion_core::EligibilityStatus;

/// Path label for requests that matched no route.
const UNMATCHED_PATH: &str = "unmatched";

/// Shared metrics state backed by a Prometheus registry.
#[derive(Clone)]
pub struct ApiMetrics {
    inner: Arc<Inner>,
}

struct Inner {
    registry: Registry,
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    http_errors_total: IntCounterVec,
    evaluations_total: IntCounterVec,
}

impl std::fmt::Debug for ApiMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiMetrics")
            .field("requests", &self.requests())
            .field("errors", &self.errors())
            .finish()
    }
}

impl ApiMetrics {
    /// Create a new metrics instance with a fresh Prometheus registry.
    pub fn new() -> Self {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("reversion_http_requests_total", "Total HTTP requests"),
            &["method", "path", "status"],
        )
        .expect("metric can be created");

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "reversion_http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.5, 1.0]),
            &["method", "path"],
        )
        .expect("metric can be created");

        let http_errors_total = IntCounterVec::new(
            Opts::new(
                "reversion_http_errors_total",
                "Total HTTP errors (4xx and 5xx)",
            ),
            &["method", "path", "status"],
        )
        .expect("metric can be created");

        let evaluations_total = IntCounterVec::new(
            Opts::new(
                "reversion_evaluations_total",
                "Eligibility evaluations by endpoint and resulting status",
            ),
            &["endpoint", "status"],
        )
        .expect("metric can be created");

        registry
            .register(Box::new(http_requests_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(http_request_duration_seconds.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(http_errors_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(evaluations_total.clone()))
            .expect("metric can be registered");

        Self {
            inner: Arc::new(Inner {
                registry,
                http_requests_total,
                http_request_duration_seconds,
                http_errors_total,
                evaluations_total,
            }),
        }
    }

    /// Total request count across all labels.
    pub fn requests(&self) -> u64 {
        sum_counters(&self.inner.http_requests_total)
    }

    /// Total error count across all labels.
    pub fn errors(&self) -> u64 {
        sum_counters(&self.inner.http_errors_total)
    }

    /// Number of evaluations that produced `status`, across endpoints.
    pub fn evaluations(&self, status: EligibilityStatus) -> u64 {
        let mut total = 0u64;
        for mf in &self.inner.evaluations_total.collect() {
            for m in mf.get_metric() {
                let matches = m
                    .get_label()
                    .iter()
                    .any(|l| l.get_name() == "status" && l.get_value() == status.as_str());
                if matches {
                    total += m.get_counter().get_value() as u64;
                }
            }
        }
        total
    }

    /// Count one evaluation outcome.
    pub fn record_evaluation(&self, endpoint: &str, status: EligibilityStatus) {
        self.inner
            .evaluations_total
            .with_label_values(&[endpoint, status.as_str()])
            .inc();
    }

    /// Record an HTTP request (called by the middleware).
    fn record_request(&self, method: &str, path: &str, status: u16, duration_secs: f64) {
        let status_str = status.to_string();
        self.inner
            .http_requests_total
            .with_label_values(&[method, path, &status_str])
            .inc();

        self.inner
            .http_request_duration_seconds
            .with_label_values(&[method, path])
            .observe(duration_secs);

        if status >= 400 {
            self.inner
                .http_errors_total
                .with_label_values(&[method, path, &status_str])
                .inc();
        }
    }

    /// Gather all metrics and encode to Prometheus text format.
    pub fn gather_and_encode(&self) -> Result<String, String> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| format!("failed to encode metrics: {e}"))?;
        String::from_utf8(buffer)
            .map_err(|e| format!("metrics encoding produced invalid UTF-8: {e}"))
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn sum_counters(counter: &IntCounterVec) -> u64 {
    let mut total = 0u64;
    for mf in &counter.collect() {
        for m in mf.get_metric() {
            total += m.get_counter().get_value() as u64;
        }
    }
    total
}

/// Middleware that records HTTP request metrics via Prometheus.
///
/// Requests are labelled with the matched route template, never the raw
/// URI, so scanners probing random paths collapse into one series.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_PATH.to_string());
    let start = Instant::now();

    let response = next.run(request).await;

    if let Some(m) = metrics {
        let duration = start.elapsed().as_secs_f64();
        m.record_request(&method, &path, response.status().as_u16(), duration);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_metrics_new_starts_at_zero() {
        let m = ApiMetrics::new();
        assert_eq!(m.requests(), 0);
        assert_eq!(m.errors(), 0);
        for status in EligibilityStatus::all() {
            assert_eq!(m.evaluations(*status), 0);
        }
    }

    #[test]
    fn request_and_error_counts_independent() {
        let m = ApiMetrics::new();
        for _ in 0..5 {
            m.record_request("POST", "/v1/termination/eligibility", 200, 0.001);
        }
        m.record_request("POST", "/v1/termination/eligibility", 422, 0.001);
        m.record_request("GET", UNMATCHED_PATH, 404, 0.001);
        assert_eq!(m.requests(), 7);
        assert_eq!(m.errors(), 2);
    }

    #[test]
    fn evaluations_counted_per_status() {
        let m = ApiMetrics::new();
        m.record_evaluation("eligibility", EligibilityStatus::CanServe);
        m.record_evaluation("schedule", EligibilityStatus::CanServe);
        m.record_evaluation("eligibility", EligibilityStatus::Expired);
        assert_eq!(m.evaluations(EligibilityStatus::CanServe), 2);
        assert_eq!(m.evaluations(EligibilityStatus::Expired), 1);
        assert_eq!(m.evaluations(EligibilityStatus::TooEarly), 0);
    }

    #[test]
    fn clones_share_the_registry() {
        let m = ApiMetrics::new();
        let clone = m.clone();
        clone.record_request("GET", "/health/liveness", 200, 0.0001);
        assert_eq!(m.requests(), 1);
    }

    #[test]
    fn encoded_output_uses_reversion_prefix() {
        let m = ApiMetrics::new();
        m.record_request("GET", "/health/liveness", 200, 0.0001);
        m.record_evaluation("eligibility", EligibilityStatus::TooEarly);
        let text = m.gather_and_encode().unwrap();
        assert!(text.contains("reversion_http_requests_total"));
        assert!(text.contains("reversion_evaluations_total"));
        assert!(text.contains("too_early"));
    }
}
