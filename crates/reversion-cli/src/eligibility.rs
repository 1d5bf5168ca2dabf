//! # Evaluate and Regime Subcommands
//!
//! `reversion evaluate` prints the termination and notice windows for a work,
//! where the evaluation date falls, and what to do next. `reversion regime`
//! prints the statutory regime only.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use reversion_core::{
    guidance, CalendarDate, EligibilityEngine, EligibilityInput, EligibilityResult,
    LeapDayPolicy, Regime, RegimeInfo, StatusGuidance,
};

use crate::resolve_as_of;

/// Arguments for `reversion evaluate`.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
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

/// Arguments for `reversion regime`.
#[derive(Args, Debug)]
pub struct RegimeArgs {
    /// Release date of the work (YYYY-MM-DD).
    pub release_date: String,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// JSON report for `reversion evaluate`.
#[derive(Debug, Serialize)]
struct EvaluationReport {
    #[serde(flatten)]
    result: EligibilityResult,
    regime: RegimeInfo,
    guidance: StatusGuidance,
    as_of: CalendarDate,
}

/// Execute `reversion evaluate`.
pub fn run_evaluate(args: &EvaluateArgs, out: &mut impl Write) -> Result<u8> {
    let input = EligibilityInput::parse(&args.release_date, !args.without_publication_right)
        .context("invalid release date")?;
    let as_of = resolve_as_of(args.as_of.as_deref())?;
    let engine = EligibilityEngine::with_leap_day_policy(args.leap_day_policy);

    let result = engine.evaluate(&input, as_of)?;
    let regime = Regime::for_release(input.release_date);
    let guidance = guidance(&result);

    tracing::info!(
        release_date = %input.release_date,
        %as_of,
        status = %result.status,
        "evaluated termination eligibility"
    );

    if args.json {
        let report = EvaluationReport {
            result,
            regime: regime.info(),
            guidance,
            as_of,
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(0);
    }

    writeln!(out, "Regime:              {} ({})", regime.label(), regime.description())?;
    writeln!(
        out,
        "Termination window:  {} to {}",
        result.termination_window_start, result.termination_window_end
    )?;
    writeln!(
        out,
        "Notice window:       {} to {}",
        result.notice_window_start, result.notice_window_end
    )?;
    writeln!(out, "Status:              {} (as of {})", result.status, as_of)?;
    writeln!(out)?;
    writeln!(out, "{}", guidance.headline)?;
    writeln!(out, "{}", guidance.message)?;
    writeln!(
        out,
        "{}: {}",
        guidance.call_to_action.label, guidance.call_to_action.url
    )?;
    Ok(0)
}

/// Execute `reversion regime`.
pub fn run_regime(args: &RegimeArgs, out: &mut impl Write) -> Result<u8> {
    let release = CalendarDate::parse(&args.release_date).context("invalid release date")?;
    let regime = Regime::for_release(release);
    tracing::debug!(release_date = %release, %regime, "classified regime");

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &regime.info())?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}: {}", regime.label(), regime.description())?;
    }
    Ok(0)
}
