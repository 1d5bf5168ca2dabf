//! # Middleware Stack
//!
//! Tower middleware for the API layer:
//! - [`tracing_layer`]: request/response tracing with `TraceLayer`.
//! - [`metrics`]: Prometheus request and evaluation metrics.
//! - [`cors`]: browser origin allow-list.

pub mod cors;
pub mod metrics;
pub mod tracing_layer;
