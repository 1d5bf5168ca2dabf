//! # reversion-cli: Termination Eligibility from the Command Line
//!
//! Provides the `reversion` command-line interface over
//! [`reversion_core`].
//!
//! ## Subcommands
//!
//! - `reversion evaluate`: Termination and notice windows, status, guidance.
//! - `reversion regime`: Section 203 / Section 304 classification.
//! - `reversion schedule`: Every statutory window for the work's regime.
//!
//! ```bash
//! reversion evaluate 1990-01-01
//! reversion evaluate 1990-01-01 --without-publication-right --as-of 2020-06-01 --json
//! reversion regime 1977-12-31
//! reversion schedule 1965-01-01 --leap-day-policy roll
//! ```
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Any other failure (e.g. writing output) |
//! | 2 | Invalid input date |

pub mod eligibility;
pub mod schedule;

use anyhow::{Context, Result};
use reversion_core::{CalendarDate, InvalidDateError};

/// Exit code for a release or evaluation date that could not be used.
pub const EXIT_INVALID_INPUT: u8 = 2;

/// Exit code for every other failure.
pub const EXIT_FAILURE: u8 = 1;

/// Map a command error to its process exit code.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    if err.chain().any(|cause| cause.is::<InvalidDateError>()) {
        EXIT_INVALID_INPUT
    } else {
        EXIT_FAILURE
    }
}

/// Resolve `--as-of`, defaulting to today's UTC date.
pub(crate) fn resolve_as_of(as_of: Option<&str>) -> Result<CalendarDate> {
    match as_of {
        Some(s) => CalendarDate::parse_lenient(s).context("invalid --as-of date"),
        None => Ok(CalendarDate::today()),
    }
}
