//! # Error Types
//!
//! The engine has exactly one failure mode: the caller supplied a date that
//! is not a usable calendar date. Everything downstream of a parsed
//! [`CalendarDate`](crate::CalendarDate) is infallible.

use thiserror::Error;

/// A date string could not be interpreted as a supported calendar date.
///
/// Raised before any window is computed, so callers never observe a
/// partially evaluated result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid date {input:?}: {reason}")]
pub struct InvalidDateError {
    /// The rejected input, verbatim.
    pub input: String,
    /// Why it was rejected.
    pub reason: String,
}

impl InvalidDateError {
    /// Build an error for `input` with the given reason.
    pub fn new(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
