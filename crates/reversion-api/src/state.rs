//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! ## Architecture
//!
//! AppState holds no domain data. Every evaluation is computed from the
//! request alone; the state only carries:
//! - **Configuration**: port, CORS allow-list, metrics switch, leap-day policy
//! - **Engine**: the configured [`EligibilityEngine`] (a `Copy` value)
//! - **Metrics**: the Prometheus registry, internally synchronized
//!
//! Session identifiers, upload URLs and usage tracking belong to the calling
//! application and never reach this service.

use reversion_core::{EligibilityEngine, LeapDayPolicy};
use thiserror::Error;

use crate::middleware::metrics::ApiMetrics;

/// Origins allowed to call the API from a browser when
/// `REVERSION_ALLOWED_ORIGINS` is not set.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "https://tools.musicadmin.com",
    "https://www.musicadmin.com",
    "https://musicadmin.com",
];

/// Error building [`AppConfig`] from the environment.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Port variable is not a valid `u16`.
    #[error("{var} must be a port number, got {value:?}")]
    InvalidPort { var: &'static str, value: String },

    /// Leap-day policy variable is not `clamp` or `roll`.
    #[error("REVERSION_LEAP_DAY_POLICY: {0}")]
    InvalidLeapDayPolicy(String),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Origins echoed in `Access-Control-Allow-Origin`.
    pub allowed_origins: Vec<String>,
    /// Whether `/metrics` and the request metrics middleware are mounted.
    pub metrics_enabled: bool,
    /// How February 29 release dates are shifted.
    pub leap_day_policy: LeapDayPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|o| o.to_string())
                .collect(),
            metrics_enabled: true,
            leap_day_policy: LeapDayPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Build configuration from process environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `REVERSION_PORT` (falls back to `PORT`) | `8080` |
    /// | `REVERSION_ALLOWED_ORIGINS` (comma-separated) | [`DEFAULT_ALLOWED_ORIGINS`] |
    /// | `REVERSION_METRICS_ENABLED` | `true` unless `"false"` |
    /// | `REVERSION_LEAP_DAY_POLICY` (`roll` / `clamp`) | `roll` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for var in ["REVERSION_PORT", "PORT"] {
            if let Some(value) = lookup(var) {
                config.port = value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidPort { var, value })?;
                break;
            }
        }

        if let Some(origins) = lookup("REVERSION_ALLOWED_ORIGINS") {
            config.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(flag) = lookup("REVERSION_METRICS_ENABLED") {
            config.metrics_enabled = flag.trim().to_lowercase() != "false";
        }

        if let Some(policy) = lookup("REVERSION_LEAP_DAY_POLICY") {
            config.leap_day_policy = policy.parse().map_err(ConfigError::InvalidLeapDayPolicy)?;
        }

        Ok(config)
    }
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub engine: EligibilityEngine,
    pub metrics: ApiMetrics,
}

impl AppState {
    /// State with the default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// State for the given configuration.
    pub fn with_config(config: AppConfig) -> Self {
        let engine = EligibilityEngine::with_leap_day_policy(config.leap_day_policy);
        Self {
            config,
            engine,
            metrics: ApiMetrics::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
