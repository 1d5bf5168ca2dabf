//! # Termination Eligibility API
//!
//! Exposes the eligibility engine over HTTP:
//!
//! - `POST /v1/termination/eligibility` evaluates a work as of a date
//!   (today by default) and returns windows, status, regime and guidance.
//! - `GET /v1/termination/regime` classifies a release date only.
//! - `POST /v1/termination/schedule` lists every statutory window for the
//!   work's regime.
//!
//! Every request is evaluated from its own inputs; nothing is stored.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use reversion_core::{
    guidance, CalendarDate, EligibilityInput, EligibilityResult, Regime, StatusGuidance,
    StatutorySchedule, StatutoryWindow,
};

use crate::error::AppError;
use crate::extractors::{extract_validated_json, extract_validated_query, Validate};
use crate::state::AppState;

fn default_true() -> bool {
    true
}

/// Body for the eligibility and schedule endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TerminationRequest {
    /// Release date of the work, `YYYY-MM-DD`.
    #[schema(example = "1990-01-01")]
    pub release_date: String,
    /// Whether the grant covers the right of publication. Defaults to `true`.
    #[serde(default = "default_true")]
    pub includes_publication_right: bool,
    /// Evaluation date, `YYYY-MM-DD` or an RFC 3339 timestamp. Defaults to
    /// today (UTC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<String>,
}

impl Validate for TerminationRequest {
    fn validate(&self) -> Result<(), String> {
        if self.release_date.trim().is_empty() {
            return Err("release_date is required".to_string());
        }
        Ok(())
    }
}

/// Query string for the regime endpoint.
#[derive(Debug, Deserialize)]
pub struct RegimeQuery {
    pub release_date: String,
}

impl Validate for RegimeQuery {
    fn validate(&self) -> Result<(), String> {
        if self.release_date.trim().is_empty() {
            return Err("release_date is required".to_string());
        }
        Ok(())
    }
}

/// Statutory regime of a work.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegimeResponse {
    /// `section203` or `section304`.
    pub regime: String,
    /// Display label, e.g. `Section 203`.
    pub label: String,
    pub description: String,
}

impl From<Regime> for RegimeResponse {
    fn from(regime: Regime) -> Self {
        Self {
            regime: regime.as_str().to_string(),
            label: regime.label().to_string(),
            description: regime.description().to_string(),
        }
    }
}

/// Follow-up link shown with a status.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CallToActionResponse {
    pub label: String,
    pub url: String,
}

/// Presentation guidance for a status.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GuidanceResponse {
    pub headline: String,
    pub message: String,
    /// `positive`, `caution`, `negative` or `neutral`.
    pub tone: String,
    pub call_to_action: CallToActionResponse,
}

impl From<StatusGuidance> for GuidanceResponse {
    fn from(g: StatusGuidance) -> Self {
        Self {
            headline: g.headline,
            message: g.message,
            tone: g.tone.as_str().to_string(),
            call_to_action: CallToActionResponse {
                label: g.call_to_action.label,
                url: g.call_to_action.url,
            },
        }
    }
}

/// Eligibility evaluation for a single work.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EligibilityResponse {
    #[schema(example = "2025-01-01")]
    pub termination_start: String,
    #[schema(example = "2030-01-01")]
    pub termination_end: String,
    #[schema(example = "2015-01-01")]
    pub notice_start: String,
    #[schema(example = "2028-01-01")]
    pub notice_end: String,
    /// `too_early`, `can_serve`, `outside_notice_window` or `expired`.
    pub status: String,
    pub regime: RegimeResponse,
    pub guidance: GuidanceResponse,
    /// Date the status was evaluated against.
    pub as_of: String,
}

impl EligibilityResponse {
    fn new(result: &EligibilityResult, regime: Regime, as_of: CalendarDate) -> Self {
        Self {
            termination_start: result.termination_window_start.to_iso8601(),
            termination_end: result.termination_window_end.to_iso8601(),
            notice_start: result.notice_window_start.to_iso8601(),
            notice_end: result.notice_window_end.to_iso8601(),
            status: result.status.as_str().to_string(),
            regime: regime.into(),
            guidance: guidance(result).into(),
            as_of: as_of.to_iso8601(),
        }
    }
}

/// One window of a statutory schedule.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScheduleWindowResponse {
    /// 1-based position in the schedule.
    pub ordinal: u8,
    /// Years after release at which the window opens.
    pub opens_after_years: i32,
    pub termination_start: String,
    pub termination_end: String,
    pub notice_start: String,
    pub notice_end: String,
    pub status: String,
}

impl From<&StatutoryWindow> for ScheduleWindowResponse {
    fn from(w: &StatutoryWindow) -> Self {
        Self {
            ordinal: w.ordinal,
            opens_after_years: w.opens_after_years,
            termination_start: w.termination.start.to_iso8601(),
            termination_end: w.termination.end.to_iso8601(),
            notice_start: w.notice.start.to_iso8601(),
            notice_end: w.notice.end.to_iso8601(),
            status: w.status.as_str().to_string(),
        }
    }
}

/// Statutory schedule for a work.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScheduleResponse {
    pub regime: RegimeResponse,
    pub windows: Vec<ScheduleWindowResponse>,
    /// Ordinal of the earliest window that has not expired.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_open: Option<u8>,
    pub as_of: String,
}

impl ScheduleResponse {
    fn new(schedule: &StatutorySchedule, as_of: CalendarDate) -> Self {
        Self {
            regime: schedule.regime.into(),
            windows: schedule.windows.iter().map(Into::into).collect(),
            next_open: schedule.next_open().map(|w| w.ordinal),
            as_of: as_of.to_iso8601(),
        }
    }
}

/// Build the termination router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/termination/eligibility", post(evaluate_eligibility))
        .route("/v1/termination/regime", get(classify_regime))
        .route("/v1/termination/schedule", post(statutory_schedule))
}

fn resolve_as_of(as_of: Option<&str>) -> Result<CalendarDate, AppError> {
    match as_of {
        Some(s) => Ok(CalendarDate::parse_lenient(s)?),
        None => Ok(CalendarDate::today()),
    }
}

/// POST /v1/termination/eligibility: Evaluate termination eligibility.
#[utoipa::path(
    post,
    path = "/v1/termination/eligibility",
    request_body = TerminationRequest,
    responses(
        (status = 200, description = "Eligibility evaluation", body = EligibilityResponse),
        (status = 422, description = "Invalid release date or evaluation date", body = crate::error::ErrorBody),
    ),
    tag = "termination"
)]
pub(crate) async fn evaluate_eligibility(
    State(state): State<AppState>,
    body: Result<Json<TerminationRequest>, JsonRejection>,
) -> Result<Json<EligibilityResponse>, AppError> {
    let req = extract_validated_json(body)?;
    let input = EligibilityInput::parse(&req.release_date, req.includes_publication_right)?;
    let as_of = resolve_as_of(req.as_of.as_deref())?;

    let result = state.engine.evaluate(&input, as_of)?;
    state.metrics.record_evaluation("eligibility", result.status);

    tracing::info!(
        release_date = %input.release_date,
        includes_publication_right = input.includes_publication_right,
        %as_of,
        status = %result.status,
        "evaluated termination eligibility"
    );

    Ok(Json(EligibilityResponse::new(
        &result,
        Regime::for_release(input.release_date),
        as_of,
    )))
}

/// GET /v1/termination/regime: Classify a release date.
#[utoipa::path(
    get,
    path = "/v1/termination/regime",
    params(
        ("release_date" = String, Query, description = "Release date, YYYY-MM-DD"),
    ),
    responses(
        (status = 200, description = "Statutory regime", body = RegimeResponse),
        (status = 422, description = "Missing or invalid release date", body = crate::error::ErrorBody),
    ),
    tag = "termination"
)]
pub(crate) async fn classify_regime(
    query: Result<Query<RegimeQuery>, QueryRejection>,
) -> Result<Json<RegimeResponse>, AppError> {
    let query = extract_validated_query(query)?;
    let release = CalendarDate::parse(&query.release_date)?;
    let regime = Regime::for_release(release);
    tracing::debug!(release_date = %release, %regime, "classified regime");
    Ok(Json(regime.into()))
}

/// POST /v1/termination/schedule: List every statutory window.
///
/// Section 203 works have one window; Section 304 works have two, opening
/// 56 and 75 years after release.
#[utoipa::path(
    post,
    path = "/v1/termination/schedule",
    request_body = TerminationRequest,
    responses(
        (status = 200, description = "Statutory schedule", body = ScheduleResponse),
        (status = 422, description = "Invalid release date or evaluation date", body = crate::error::ErrorBody),
    ),
    tag = "termination"
)]
pub(crate) async fn statutory_schedule(
    State(state): State<AppState>,
    body: Result<Json<TerminationRequest>, JsonRejection>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let req = extract_validated_json(body)?;
    let input = EligibilityInput::parse(&req.release_date, req.includes_publication_right)?;
    let as_of = resolve_as_of(req.as_of.as_deref())?;

    let schedule = state.engine.schedule(&input, as_of)?;
    for window in &schedule.windows {
        state.metrics.record_evaluation("schedule", window.status);
    }

    tracing::info!(
        release_date = %input.release_date,
        regime = %schedule.regime,
        windows = schedule.windows.len(),
        "built statutory schedule"
    );

    Ok(Json(ScheduleResponse::new(&schedule, as_of)))
}
