//! # Statutory Regime: Section 203 vs Section 304
//!
//! A work released before January 1, 1978 falls under Section 304 of the
//! U.S. Copyright Act; anything released on or after that date falls under
//! Section 203. The regime is determined by the release date alone.
//!
//! [`evaluate`](crate::engine::EligibilityEngine::evaluate) does not consult
//! the regime; its 35/40-year anchors apply uniformly. The regime-specific
//! window structure lives in [`schedule`](crate::schedule).

use serde::{Deserialize, Serialize};

use crate::calendar::CalendarDate;

/// Year in which Section 203 starts to apply (first day: January 1).
pub const SECTION_203_CUTOFF_YEAR: i32 = 1978;

/// The statutory section governing a work's termination right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Grants by the author on or after January 1, 1978.
    Section203,
    /// Works published before January 1, 1978.
    Section304,
}

impl Regime {
    /// Determine the regime for a release date.
    pub fn for_release(release: CalendarDate) -> Self {
        if release.year() < SECTION_203_CUTOFF_YEAR {
            Self::Section304
        } else {
            Self::Section203
        }
    }

    /// Machine identifier, identical to the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Section203 => "section203",
            Self::Section304 => "section304",
        }
    }

    /// Display label, e.g. `"Section 203"`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Section203 => "Section 203",
            Self::Section304 => "Section 304",
        }
    }

    /// Human-readable applicability statement.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Section203 => "Works published on or after January 1, 1978",
            Self::Section304 => "Works published before January 1, 1978",
        }
    }

    /// Label plus description as a plain value.
    pub fn info(&self) -> RegimeInfo {
        RegimeInfo {
            label: self.label().to_string(),
            description: self.description().to_string(),
        }
    }
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Regime classification as presented to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeInfo {
    pub label: String,
    pub description: String,
}
