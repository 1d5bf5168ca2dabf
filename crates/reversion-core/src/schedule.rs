//! # Statutory Schedule
//!
//! The regime-specific window structure described by the statute:
//!
//! | Regime | Windows |
//! |--------|---------|
//! | Section 203 | one window, identical to [`EligibilityEngine::evaluate`] |
//! | Section 304 | two windows, opening 56 and 75 years after release, 5 years each |
//!
//! Every window carries its own notice window (10 to 2 years ahead) and its
//! own status. This is reported next to the uniform 35/40-year evaluation,
//! never in place of it: `evaluate` keeps the single-window behaviour for
//! every regime.

use serde::{Deserialize, Serialize};

use crate::calendar::CalendarDate;
use crate::engine::{EligibilityEngine, EligibilityInput};
use crate::error::InvalidDateError;
use crate::regime::Regime;
use crate::status::{self, EligibilityStatus};
use crate::window::{DateWindow, TerminationWindow, TERMINATION_ANCHOR_YEARS};

/// Years after release at which the first Section 304 window opens.
pub const SECTION_304_FIRST_WINDOW_YEARS: i32 = 56;

/// Years after release at which the second Section 304 window opens.
pub const SECTION_304_SECOND_WINDOW_YEARS: i32 = 75;

/// One window of a statutory schedule, classified as of the evaluation date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryWindow {
    /// 1-based position within the schedule.
    pub ordinal: u8,
    /// Years from release to the opening of the termination window.
    pub opens_after_years: i32,
    pub termination: DateWindow,
    pub notice: DateWindow,
    pub status: EligibilityStatus,
}

impl StatutoryWindow {
    fn classified(
        ordinal: u8,
        opens_after_years: i32,
        window: TerminationWindow,
        now: CalendarDate,
    ) -> Self {
        Self {
            ordinal,
            opens_after_years,
            termination: window.termination,
            notice: window.notice,
            status: status::classify(&window, now),
        }
    }
}

/// All statutory windows for a work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutorySchedule {
    pub regime: Regime,
    pub windows: Vec<StatutoryWindow>,
}

impl StatutorySchedule {
    /// The earliest window that has not yet expired.
    pub fn next_open(&self) -> Option<&StatutoryWindow> {
        self.windows
            .iter()
            .find(|w| w.status != EligibilityStatus::Expired)
    }
}

impl EligibilityEngine {
    /// Build the statutory schedule for a work as of `now`.
    ///
    /// The publication-right flag only affects the Section 203 window.
    pub fn schedule(
        &self,
        input: &EligibilityInput,
        now: CalendarDate,
    ) -> Result<StatutorySchedule, InvalidDateError> {
        let regime = Regime::for_release(input.release_date);
        let windows = match regime {
            Regime::Section203 => {
                let window = self.windows(input)?;
                vec![StatutoryWindow::classified(
                    1,
                    TERMINATION_ANCHOR_YEARS,
                    window,
                    now,
                )]
            }
            Regime::Section304 => {
                let offsets = [
                    SECTION_304_FIRST_WINDOW_YEARS,
                    SECTION_304_SECOND_WINDOW_YEARS,
                ];
                let mut windows = Vec::with_capacity(offsets.len());
                for (ordinal, years) in (1u8..).zip(offsets) {
                    let window = TerminationWindow::opening_after(
                        input.release_date,
                        years,
                        self.leap_day_policy(),
                    )
                    .ok_or_else(|| {
                        InvalidDateError::new(
                            input.release_date.to_iso8601(),
                            "date arithmetic out of range",
                        )
                    })?;
                    windows.push(StatutoryWindow::classified(ordinal, years, window, now));
                }
                windows
            }
        };
        Ok(StatutorySchedule { regime, windows })
    }
}

/// Build the statutory schedule for a release date string.
///
/// `now` defaults to the current UTC date.
pub fn statutory_schedule(
    release_date: &str,
    includes_publication_right: bool,
    now: Option<CalendarDate>,
) -> Result<StatutorySchedule, InvalidDateError> {
    let input = EligibilityInput::parse(release_date, includes_publication_right)?;
    EligibilityEngine::new().schedule(&input, now.unwrap_or_else(CalendarDate::today))
}
