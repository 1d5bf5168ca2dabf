//! # Schedule Subcommand
//!
//! `reversion schedule` lists every statutory termination window for a
//! work: one for Section 203 grants, two for Section 304 grants.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use reversion_core::{
    CalendarDate, EligibilityEngine, EligibilityInput, LeapDayPolicy, StatutorySchedule,
};

use crate::resolve_as_of;

/// Arguments for `reversion schedule`.
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// Release date of the work (YYYY-MM-DD).
    pub release_date: String,

    /// The grant does not cover the right of publication.
    #[arg(long)]
    pub without_publication_right: bool,

    /// Evaluate as of this date instead of today (YYYY-MM-DD or RFC 3339).
    #[arg(long)]
    pub as_of: Option<String>,

    /// How to shift a February 29 release date into non-leap years.
    #[arg(long, default_value = "roll")]
    pub leap_day_policy: LeapDayPolicy,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ScheduleReport<'a> {
    #[serde(flatten)]
    schedule: &'a StatutorySchedule,
    next_open: Option<u8>,
    as_of: CalendarDate,
}

/// Execute `reversion schedule`.
pub fn run_schedule(args: &ScheduleArgs, out: &mut impl Write) -> Result<u8> {
    let input = EligibilityInput::parse(&args.release_date, !args.without_publication_right)
        .context("invalid release date")?;
    let as_of = resolve_as_of(args.as_of.as_deref())?;
    let schedule =
        EligibilityEngine::with_leap_day_policy(args.leap_day_policy).schedule(&input, as_of)?;
    let next_open = schedule.next_open().map(|w| w.ordinal);

    tracing::info!(
        release_date = %input.release_date,
        regime = %schedule.regime,
        windows = schedule.windows.len(),
        "built statutory schedule"
    );

    if args.json {
        let report = ScheduleReport {
            schedule: &schedule,
            next_open,
            as_of,
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(0);
    }

    writeln!(
        out,
        "{} ({}), as of {}",
        schedule.regime.label(),
        schedule.regime.description(),
        as_of
    )?;
    for window in &schedule.windows {
        let marker = if Some(window.ordinal) == next_open {
            "  <- next"
        } else {
            ""
        };
        writeln!(out)?;
        writeln!(
            out,
            "Window {} (opens {} years after release){}",
            window.ordinal, window.opens_after_years, marker
        )?;
        writeln!(
            out,
            "  Termination:  {} to {}",
            window.termination.start, window.termination.end
        )?;
        writeln!(
            out,
            "  Notice:       {} to {}",
            window.notice.start, window.notice.end
        )?;
        writeln!(out, "  Status:       {}", window.status)?;
    }
    Ok(0)
}
