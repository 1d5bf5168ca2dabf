//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI document,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Reversion API: Copyright Termination Eligibility",
        description = "Computes when a U.S. copyright grant can be terminated and when notice of termination can be served.\n\nProvides:\n- **Eligibility** evaluation with status and presentation guidance\n- **Regime** classification (Section 203 or Section 304)\n- **Statutory schedule** listing every window for the work's regime\n\nThe service is stateless; nothing about a request is stored.",
        license(name = "AGPL-3.0-or-later")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        crate::routes::termination::evaluate_eligibility,
        crate::routes::termination::classify_regime,
        crate::routes::termination::statutory_schedule,
    ),
    components(
        schemas(
            // ── Error types ─────────────────────────────────────────────
            crate::error::ErrorBody,
            crate::error::ErrorDetail,
            // ── Termination DTOs ────────────────────────────────────────
            crate::routes::termination::TerminationRequest,
            crate::routes::termination::EligibilityResponse,
            crate::routes::termination::RegimeResponse,
            crate::routes::termination::GuidanceResponse,
            crate::routes::termination::CallToActionResponse,
            crate::routes::termination::ScheduleResponse,
            crate::routes::termination::ScheduleWindowResponse,
        ),
    ),
    tags(
        (name = "termination", description = "Termination windows, notice windows, regime classification and statutory schedules"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_generates_successfully() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("/v1/termination/eligibility"));
        assert!(json.contains("/v1/termination/regime"));
        assert!(json.contains("/v1/termination/schedule"));
    }

    #[test]
    fn test_openapi_registers_schemas() {
        let spec = ApiDoc::openapi();
        let components = spec.components.expect("components present");
        for name in ["ErrorBody", "TerminationRequest", "EligibilityResponse", "ScheduleResponse"] {
            assert!(components.schemas.contains_key(name), "missing schema {name}");
        }
    }
}
