//! # reversion-core: Copyright Termination Eligibility Engine
//!
//! Given the release date of a work and whether the grant covers the
//! publication right, computes when a U.S. copyright grant can be
//! terminated, when notice of termination can be served, and where today
//! falls relative to both.
//!
//! ## Key Design Principles
//!
//! 1. **Pure and stateless.** Every call recomputes from its inputs; nothing
//!    is cached or stored. The evaluation date is a parameter, so results
//!    are reproducible in tests.
//!
//! 2. **Calendar-year arithmetic.** Statutory terms count calendar years from
//!    the release date. [`CalendarDate::add_years`] shifts dates without
//!    mutation and resolves leap days through an explicit [`LeapDayPolicy`].
//!
//! 3. **Ordered classification.** The eligibility status comes from an
//!    ordered rule list ([`status::CLASSIFICATION_RULES`]), first match wins.
//!
//! 4. **One error.** Only date parsing can fail ([`InvalidDateError`]).
//!
//! ## Crate Policy
//!
//! - No I/O, no logging, no global state.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod calendar;
pub mod engine;
pub mod error;
pub mod guidance;
pub mod regime;
pub mod schedule;
pub mod status;
pub mod window;

// Re-export primary types for ergonomic imports.
pub use calendar::{CalendarDate, LeapDayPolicy};
pub use engine::{classify_regime, evaluate, EligibilityEngine, EligibilityInput, EligibilityResult};
pub use error::InvalidDateError;
pub use guidance::{guidance, CallToAction, StatusGuidance, Tone};
pub use regime::{Regime, RegimeInfo};
pub use schedule::{statutory_schedule, StatutorySchedule, StatutoryWindow};
pub use status::EligibilityStatus;
pub use window::{DateWindow, TerminationWindow};
