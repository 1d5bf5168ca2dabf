//! # Calendar Dates: Day-Precision, Time-Free
//!
//! Defines [`CalendarDate`], the only date type the engine works with.
//! Statutory terms are counted in calendar years from a release date, so all
//! arithmetic here is calendar-year arithmetic on dates, never elapsed-time
//! durations.
//!
//! ## Invariants
//!
//! - No time-of-day and no timezone. "Today" is the current UTC date.
//! - Parsed dates carry a four-digit year (`0001..=9999`). Window arithmetic
//!   on any such date stays well inside chrono's representable range.
//! - Year shifting is pure: [`CalendarDate::add_years`] returns a new value.
//!
//! ## Leap Days
//!
//! Shifting February 29 into a non-leap year has no exact answer. The
//! [`LeapDayPolicy`] picks between March 1 (roll forward, the default, the
//! overflow behaviour of day-of-month arithmetic) and February 28 (clamp).

use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::InvalidDateError;

/// Smallest accepted year.
pub const MIN_YEAR: i32 = 1;

/// Largest accepted year.
pub const MAX_YEAR: i32 = 9999;

/// How to resolve February 29 when the target year has no leap day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeapDayPolicy {
    /// February 29 becomes February 28 of the target year.
    ClampToFebruary28,
    /// February 29 becomes March 1 of the target year.
    #[default]
    RollToMarch1,
}

impl LeapDayPolicy {
    /// Short configuration identifier (`clamp` or `roll`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClampToFebruary28 => "clamp",
            Self::RollToMarch1 => "roll",
        }
    }
}

impl std::fmt::Display for LeapDayPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeapDayPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clamp" | "clamp_to_february_28" => Ok(Self::ClampToFebruary28),
            "roll" | "roll_to_march_1" => Ok(Self::RollToMarch1),
            other => Err(format!(
                "unknown leap day policy {other:?}; expected \"clamp\" or \"roll\""
            )),
        }
    }
}

/// A calendar date with no time-of-day semantics.
///
/// # Construction
///
/// - [`CalendarDate::parse()`]: strict `YYYY-MM-DD`.
/// - [`CalendarDate::parse_lenient()`]: also accepts RFC 3339 timestamps.
/// - [`CalendarDate::from_ymd()`]: from components.
/// - [`CalendarDate::today()`]: current UTC date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Build a date from year, month and day.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDateError`] if the components do not name a real
    /// day or the year is outside `MIN_YEAR..=MAX_YEAR`.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, InvalidDateError> {
        let rendered = format!("{year:04}-{month:02}-{day:02}");
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| InvalidDateError::new(&rendered, "no such calendar day"))?;
        Self::checked(date, &rendered)
    }

    /// The current date in UTC.
    pub fn today() -> Self {
        Self(Utc::now().date_naive())
    }

    /// Parse a strict ISO 8601 calendar date (`YYYY-MM-DD`).
    ///
    /// Surrounding whitespace is ignored. Unpadded components, timestamps
    /// and expanded years are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDateError`] if the string is not of that shape,
    /// names a day that does not exist, or has a year outside
    /// `MIN_YEAR..=MAX_YEAR`.
    pub fn parse(s: &str) -> Result<Self, InvalidDateError> {
        let trimmed = s.trim();
        let bytes = trimmed.as_bytes();
        let shaped = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !shaped {
            return Err(InvalidDateError::new(s, "expected an ISO 8601 date (YYYY-MM-DD)"));
        }

        let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map_err(|e| InvalidDateError::new(s, e.to_string()))?;
        Self::checked(date, s)
    }

    /// Parse either a `YYYY-MM-DD` date or an RFC 3339 timestamp.
    ///
    /// Timestamps are converted to UTC and truncated to their date. This is
    /// for ingesting values from clients that send full `Date` strings.
    pub fn parse_lenient(s: &str) -> Result<Self, InvalidDateError> {
        if let Ok(date) = Self::parse(s) {
            return Ok(date);
        }
        let dt = DateTime::parse_from_rfc3339(s.trim()).map_err(|_| {
            InvalidDateError::new(s, "expected an ISO 8601 date or RFC 3339 timestamp")
        })?;
        Self::checked(dt.with_timezone(&Utc).date_naive(), s)
    }

    fn checked(date: NaiveDate, input: &str) -> Result<Self, InvalidDateError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
            return Err(InvalidDateError::new(
                input,
                format!("year must be between {MIN_YEAR} and {MAX_YEAR}"),
            ));
        }
        Ok(Self(date))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Shift by a whole number of calendar years (negative shifts go back).
    ///
    /// Month and day are preserved. February 29 landing in a non-leap year
    /// is resolved by `policy`. Returns `None` only when the result falls
    /// outside chrono's representable range.
    pub fn add_years(self, years: i32, policy: LeapDayPolicy) -> Option<Self> {
        let year = self.0.year().checked_add(years)?;
        let (month, day) = (self.0.month(), self.0.day());
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => Some(Self(date)),
            None if month == 2 && day == 29 => match policy {
                LeapDayPolicy::ClampToFebruary28 => NaiveDate::from_ymd_opt(year, 2, 28),
                LeapDayPolicy::RollToMarch1 => NaiveDate::from_ymd_opt(year, 3, 1),
            }
            .map(Self),
            None => None,
        }
    }

    /// Render as `YYYY-MM-DD`.
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// Render in long US form, e.g. `January 1, 2025`.
    pub fn to_long_form(&self) -> String {
        self.0.format("%B %-d, %Y").to_string()
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl FromStr for CalendarDate {
    type Err = InvalidDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso8601())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    // ---- parse() ----

    #[test]
    fn test_parse_iso_date() {
        let d = date("1990-01-01");
        assert_eq!((d.year(), d.month(), d.day()), (1990, 1, 1));
        assert_eq!(d.to_iso8601(), "1990-01-01");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(date("  2001-09-11\n").to_iso8601(), "2001-09-11");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(CalendarDate::parse("not-a-date").is_err());
        assert!(CalendarDate::parse("").is_err());
        assert!(CalendarDate::parse("1990/01/01").is_err());
        assert!(CalendarDate::parse("1990-1-1").is_err());
        assert!(CalendarDate::parse("1990-01-01T00:00:00Z").is_err());
    }

    #[test]
    fn test_parse_rejects_impossible_days() {
        assert!(CalendarDate::parse("2023-02-29").is_err());
        assert!(CalendarDate::parse("2023-04-31").is_err());
        assert!(CalendarDate::parse("2023-13-01").is_err());
        assert!(CalendarDate::parse("2024-02-29").is_ok());
    }

    #[test]
    fn test_parse_rejects_year_zero() {
        let err = CalendarDate::parse("0000-06-15").unwrap_err();
        assert!(err.reason.contains("year must be between"));
    }

    #[test]
    fn test_error_preserves_input() {
        let err = CalendarDate::parse("not-a-date").unwrap_err();
        assert_eq!(err.input, "not-a-date");
    }

    // ---- parse_lenient() ----

    #[test]
    fn test_parse_lenient_accepts_plain_date() {
        assert_eq!(
            CalendarDate::parse_lenient("1978-01-01").unwrap(),
            date("1978-01-01")
        );
    }

    #[test]
    fn test_parse_lenient_takes_utc_date_of_timestamp() {
        let d = CalendarDate::parse_lenient("1990-01-01T00:00:00.000Z").unwrap();
        assert_eq!(d, date("1990-01-01"));
        // 23:30 at -05:00 is already the next day in UTC.
        let d = CalendarDate::parse_lenient("1989-12-31T23:30:00-05:00").unwrap();
        assert_eq!(d, date("1990-01-01"));
    }

    #[test]
    fn test_parse_lenient_rejects_garbage() {
        assert!(CalendarDate::parse_lenient("yesterday").is_err());
    }

    // ---- from_ymd() ----

    #[test]
    fn test_from_ymd() {
        assert_eq!(CalendarDate::from_ymd(1965, 1, 1).unwrap(), date("1965-01-01"));
        assert!(CalendarDate::from_ymd(1965, 2, 30).is_err());
        assert!(CalendarDate::from_ymd(10_000, 1, 1).is_err());
    }

    // ---- add_years() ----

    #[test]
    fn test_add_years_preserves_month_and_day() {
        let d = date("1990-07-04");
        let shifted = d.add_years(35, LeapDayPolicy::default()).unwrap();
        assert_eq!(shifted, date("2025-07-04"));
        // The receiver is untouched.
        assert_eq!(d, date("1990-07-04"));
    }

    #[test]
    fn test_add_negative_years() {
        let d = date("2025-01-01");
        assert_eq!(
            d.add_years(-10, LeapDayPolicy::default()).unwrap(),
            date("2015-01-01")
        );
    }

    #[test]
    fn test_leap_day_clamps_to_feb_28() {
        let d = date("1988-02-29");
        assert_eq!(
            d.add_years(35, LeapDayPolicy::ClampToFebruary28).unwrap(),
            date("2023-02-28")
        );
    }

    #[test]
    fn test_leap_day_rolls_to_mar_1() {
        let d = date("1988-02-29");
        assert_eq!(
            d.add_years(35, LeapDayPolicy::RollToMarch1).unwrap(),
            date("2023-03-01")
        );
    }

    #[test]
    fn test_leap_day_into_leap_year_is_exact() {
        let d = date("1988-02-29");
        for policy in [LeapDayPolicy::ClampToFebruary28, LeapDayPolicy::RollToMarch1] {
            assert_eq!(d.add_years(40, policy).unwrap(), date("2028-02-29"));
        }
    }

    // ---- rendering ----

    #[test]
    fn test_long_form() {
        assert_eq!(date("2025-01-01").to_long_form(), "January 1, 2025");
        assert_eq!(date("2030-11-23").to_long_form(), "November 23, 2030");
    }

    #[test]
    fn test_display_matches_iso8601() {
        let d = date("0999-03-05");
        assert_eq!(d.to_string(), "0999-03-05");
    }

    #[test]
    fn test_ordering() {
        assert!(date("1977-12-31") < date("1978-01-01"));
    }

    // ---- serde ----

    #[test]
    fn test_serializes_as_iso_string() {
        let json = serde_json::to_string(&date("2015-01-01")).unwrap();
        assert_eq!(json, "\"2015-01-01\"");
    }

    #[test]
    fn test_deserialize_rejects_invalid() {
        let parsed: Result<CalendarDate, _> = serde_json::from_str("\"2015-02-30\"");
        assert!(parsed.is_err());
    }

    // ---- LeapDayPolicy ----

    #[test]
    fn test_leap_day_policy_from_str() {
        assert_eq!(
            "clamp".parse::<LeapDayPolicy>().unwrap(),
            LeapDayPolicy::ClampToFebruary28
        );
        assert_eq!(
            " ROLL ".parse::<LeapDayPolicy>().unwrap(),
            LeapDayPolicy::RollToMarch1
        );
        assert!("nearest".parse::<LeapDayPolicy>().is_err());
    }

    #[test]
    fn test_leap_day_policy_default_is_roll() {
        assert_eq!(LeapDayPolicy::default(), LeapDayPolicy::RollToMarch1);
        assert_eq!(LeapDayPolicy::default().to_string(), "roll");
        let d = date("1988-02-29");
        assert_eq!(
            d.add_years(35, LeapDayPolicy::default()).unwrap(),
            date("2023-03-01")
        );
    }
}
