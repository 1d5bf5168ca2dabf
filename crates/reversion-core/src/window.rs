//! # Termination and Notice Windows
//!
//! A termination window is the span in which a reversion may take effect.
//! Each one carries a notice window: notice must be served between 10 and 2
//! years before the chosen termination date, so the notice window runs from
//! `termination.start - 10y` to `termination.end - 2y`.
//!
//! With a five-year termination window the notice window is always
//! exactly thirteen years long.

use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarDate, LeapDayPolicy};

/// Years from release to the opening of the termination window.
pub const TERMINATION_ANCHOR_YEARS: i32 = 35;

/// Years from release to the close of the window when the grant covers the
/// publication right.
pub const PUBLICATION_RIGHT_ANCHOR_YEARS: i32 = 40;

/// Length of a termination window in years.
pub const WINDOW_LENGTH_YEARS: i32 = 5;

/// Earliest notice may be served, in years before termination.
pub const NOTICE_MAX_LEAD_YEARS: i32 = 10;

/// Latest notice may be served, in years before termination.
pub const NOTICE_MIN_LEAD_YEARS: i32 = 2;

/// An inclusive span of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: CalendarDate,
    pub end: CalendarDate,
}

impl DateWindow {
    pub fn new(start: CalendarDate, end: CalendarDate) -> Self {
        Self { start, end }
    }

    /// Whether `date` lies within `[start, end]`.
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whether `date` is strictly before the window.
    pub fn is_before(&self, date: CalendarDate) -> bool {
        date < self.start
    }

    /// Whether `date` is strictly after the window.
    pub fn is_after(&self, date: CalendarDate) -> bool {
        date > self.end
    }
}

/// A termination window together with its notice-serving window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminationWindow {
    pub termination: DateWindow,
    pub notice: DateWindow,
}

impl TerminationWindow {
    /// Derive the notice window from a termination window.
    ///
    /// Returns `None` only if the shifted dates fall outside chrono's
    /// representable range.
    pub fn from_termination(termination: DateWindow, policy: LeapDayPolicy) -> Option<Self> {
        let notice = DateWindow {
            start: termination.start.add_years(-NOTICE_MAX_LEAD_YEARS, policy)?,
            end: termination.end.add_years(-NOTICE_MIN_LEAD_YEARS, policy)?,
        };
        Some(Self {
            termination,
            notice,
        })
    }

    /// Window opening `years_after_release` years after `release` and lasting
    /// [`WINDOW_LENGTH_YEARS`].
    pub fn opening_after(
        release: CalendarDate,
        years_after_release: i32,
        policy: LeapDayPolicy,
    ) -> Option<Self> {
        let start = release.add_years(years_after_release, policy)?;
        let end = release.add_years(years_after_release + WINDOW_LENGTH_YEARS, policy)?;
        Self::from_termination(DateWindow::new(start, end), policy)
    }
}
