//! # Eligibility Status: Time-Indexed Classification
//!
//! The status is never stored. It is recomputed from a [`TerminationWindow`]
//! and the evaluation date on every call, so the same work evaluated on
//! different days may classify differently.
//!
//! Classification runs [`CLASSIFICATION_RULES`] in order and takes the first
//! rule that applies. The last rule always applies, so the list is
//! exhaustive.
//!
//! As `now` advances the status sweeps through the variants in declaration
//! order and never goes back; the derived `Ord` follows that order.

use serde::{Deserialize, Serialize};

use crate::calendar::CalendarDate;
use crate::window::TerminationWindow;

/// Where the evaluation date falls relative to a work's windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    /// Before the notice window opens.
    TooEarly,
    /// Inside the notice window; notice can be served today.
    CanServe,
    /// Past the last notice date but the termination window is still open.
    OutsideNoticeWindow,
    /// Past the end of the termination window.
    Expired,
}

impl EligibilityStatus {
    /// All statuses in temporal order.
    pub fn all() -> &'static [EligibilityStatus] {
        &[
            Self::TooEarly,
            Self::CanServe,
            Self::OutsideNoticeWindow,
            Self::Expired,
        ]
    }

    /// The snake_case identifier, identical to the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TooEarly => "too_early",
            Self::CanServe => "can_serve",
            Self::OutsideNoticeWindow => "outside_notice_window",
            Self::Expired => "expired",
        }
    }
}

impl std::fmt::Display for EligibilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classification predicate over a window and the evaluation date.
pub type Predicate = fn(&TerminationWindow, CalendarDate) -> bool;

fn past_termination(w: &TerminationWindow, now: CalendarDate) -> bool {
    w.termination.is_after(now)
}

fn before_notice(w: &TerminationWindow, now: CalendarDate) -> bool {
    w.notice.is_before(now)
}

fn within_notice(w: &TerminationWindow, now: CalendarDate) -> bool {
    w.notice.contains(now)
}

fn otherwise(_: &TerminationWindow, _: CalendarDate) -> bool {
    true
}

/// Ordered classification rules. First match wins.
pub const CLASSIFICATION_RULES: [(EligibilityStatus, Predicate); 4] = [
    (EligibilityStatus::Expired, past_termination),
    (EligibilityStatus::TooEarly, before_notice),
    (EligibilityStatus::CanServe, within_notice),
    (EligibilityStatus::OutsideNoticeWindow, otherwise),
];

/// Classify `now` against a window.
pub fn classify(window: &TerminationWindow, now: CalendarDate) -> EligibilityStatus {
    CLASSIFICATION_RULES
        .iter()
        .find(|(_, applies)| applies(window, now))
        .map(|(status, _)| *status)
        .unwrap_or(EligibilityStatus::OutsideNoticeWindow)
}
