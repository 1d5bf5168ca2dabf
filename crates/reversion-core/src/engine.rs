//! # Eligibility Engine
//!
//! Computes a work's termination window, its notice window, and the current
//! eligibility status from a release date and the publication-right flag.
//!
//! ## Algorithm
//!
//! 1. `termination.start = release + 35y`
//! 2. `termination.end = release + 40y` with the publication right,
//!    otherwise `termination.start + 5y`
//! 3. `notice.start = termination.start - 10y`
//! 4. `notice.end = termination.end - 2y`
//! 5. status via [`status::classify`]
//!
//! The statutory regime is reported alongside but does not alter the
//! arithmetic. See [`crate::schedule`] for the regime-specific windows.

use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarDate, LeapDayPolicy};
use crate::error::InvalidDateError;
use crate::regime::{Regime, RegimeInfo};
use crate::status::{self, EligibilityStatus};
use crate::window::{
    DateWindow, TerminationWindow, PUBLICATION_RIGHT_ANCHOR_YEARS, TERMINATION_ANCHOR_YEARS,
    WINDOW_LENGTH_YEARS,
};

/// What the engine needs to know about a work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityInput {
    pub release_date: CalendarDate,
    pub includes_publication_right: bool,
}

impl EligibilityInput {
    pub fn new(release_date: CalendarDate, includes_publication_right: bool) -> Self {
        Self {
            release_date,
            includes_publication_right,
        }
    }

    /// Parse the release date from a `YYYY-MM-DD` string.
    pub fn parse(
        release_date: &str,
        includes_publication_right: bool,
    ) -> Result<Self, InvalidDateError> {
        Ok(Self::new(
            CalendarDate::parse(release_date)?,
            includes_publication_right,
        ))
    }
}

/// Window boundaries and status for one evaluation.
///
/// Serialized field names match the public wire format
/// (`termination_start`, `notice_end`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityResult {
    #[serde(rename = "termination_start")]
    pub termination_window_start: CalendarDate,
    #[serde(rename = "termination_end")]
    pub termination_window_end: CalendarDate,
    #[serde(rename = "notice_start")]
    pub notice_window_start: CalendarDate,
    #[serde(rename = "notice_end")]
    pub notice_window_end: CalendarDate,
    pub status: EligibilityStatus,
}

impl EligibilityResult {
    fn from_window(window: &TerminationWindow, status: EligibilityStatus) -> Self {
        Self {
            termination_window_start: window.termination.start,
            termination_window_end: window.termination.end,
            notice_window_start: window.notice.start,
            notice_window_end: window.notice.end,
            status,
        }
    }

    pub fn termination_window(&self) -> DateWindow {
        DateWindow::new(self.termination_window_start, self.termination_window_end)
    }

    pub fn notice_window(&self) -> DateWindow {
        DateWindow::new(self.notice_window_start, self.notice_window_end)
    }
}

/// Stateless evaluator. The only knob is how leap days are shifted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EligibilityEngine {
    leap_day_policy: LeapDayPolicy,
}

impl EligibilityEngine {
    /// Engine with the default leap-day policy (roll to March 1).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_leap_day_policy(leap_day_policy: LeapDayPolicy) -> Self {
        Self { leap_day_policy }
    }

    pub fn leap_day_policy(&self) -> LeapDayPolicy {
        self.leap_day_policy
    }

    /// Compute the termination and notice windows for a work.
    ///
    /// # Errors
    ///
    /// [`InvalidDateError`] if the shifted dates leave chrono's range. This
    /// cannot happen for dates produced by [`CalendarDate::parse`].
    pub fn windows(&self, input: &EligibilityInput) -> Result<TerminationWindow, InvalidDateError> {
        let policy = self.leap_day_policy;
        let release = input.release_date;
        let out_of_range =
            || InvalidDateError::new(release.to_iso8601(), "date arithmetic out of range");

        let start = release
            .add_years(TERMINATION_ANCHOR_YEARS, policy)
            .ok_or_else(out_of_range)?;
        let end = if input.includes_publication_right {
            release.add_years(PUBLICATION_RIGHT_ANCHOR_YEARS, policy)
        } else {
            start.add_years(WINDOW_LENGTH_YEARS, policy)
        }
        .ok_or_else(out_of_range)?;

        TerminationWindow::from_termination(DateWindow::new(start, end), policy)
            .ok_or_else(out_of_range)
    }

    /// Evaluate a work as of `now`.
    pub fn evaluate(
        &self,
        input: &EligibilityInput,
        now: CalendarDate,
    ) -> Result<EligibilityResult, InvalidDateError> {
        let window = self.windows(input)?;
        Ok(EligibilityResult::from_window(
            &window,
            status::classify(&window, now),
        ))
    }
}

/// Evaluate a release date string with the default engine.
///
/// `now` defaults to the current UTC date.
///
/// # Errors
///
/// [`InvalidDateError`] if `release_date` is not a `YYYY-MM-DD` date.
pub fn evaluate(
    release_date: &str,
    includes_publication_right: bool,
    now: Option<CalendarDate>,
) -> Result<EligibilityResult, InvalidDateError> {
    let input = EligibilityInput::parse(release_date, includes_publication_right)?;
    EligibilityEngine::new().evaluate(&input, now.unwrap_or_else(CalendarDate::today))
}

/// Classify a release date string into its statutory regime.
///
/// # Errors
///
/// [`InvalidDateError`] if `release_date` is not a `YYYY-MM-DD` date.
pub fn classify_regime(release_date: &str) -> Result<RegimeInfo, InvalidDateError> {
    let release = CalendarDate::parse(release_date)?;
    Ok(Regime::for_release(release).info())
}
