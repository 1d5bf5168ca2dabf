//! # Status Guidance
//!
//! What to tell a rights holder for each status: a headline, a sentence of
//! explanation, an indicator tone and the follow-up action. Dates are given
//! in long US form.

use serde::{Deserialize, Serialize};

use crate::engine::EligibilityResult;
use crate::status::EligibilityStatus;

/// Consultation intake page.
pub const GET_STARTED_URL: &str = "https://www.musicadmin.com/get-started/";

/// Calendar event editor used for notice reminders.
pub const CALENDAR_REMINDER_URL: &str = "https://calendar.google.com/calendar/r/eventedit";

/// Indicator tone for a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Positive,
    Caution,
    Negative,
    Neutral,
}

impl Tone {
    /// The snake_case identifier, identical to the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Caution => "caution",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

/// A follow-up link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallToAction {
    pub label: String,
    pub url: String,
}

impl CallToAction {
    fn new(label: &str, url: &str) -> Self {
        Self {
            label: label.to_string(),
            url: url.to_string(),
        }
    }
}

/// Presentation-ready summary of an [`EligibilityResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusGuidance {
    pub headline: String,
    pub message: String,
    pub tone: Tone,
    pub call_to_action: CallToAction,
}

/// Build guidance for a result.
pub fn guidance(result: &EligibilityResult) -> StatusGuidance {
    let explore = || CallToAction::new("Explore Other Options", GET_STARTED_URL);
    match result.status {
        EligibilityStatus::CanServe => StatusGuidance {
            headline: "Can Serve Notice Now".to_string(),
            message: format!(
                "You can serve termination notice now. If you serve notice today, you can \
                 choose any termination date between {} and {}.",
                result.termination_window_start.to_long_form(),
                result.termination_window_end.to_long_form(),
            ),
            tone: Tone::Positive,
            call_to_action: CallToAction::new("Contact Us", GET_STARTED_URL),
        },
        EligibilityStatus::TooEarly => StatusGuidance {
            headline: "Cannot Serve Notice Yet".to_string(),
            message: format!(
                "You cannot serve termination notice yet. The earliest date you can serve \
                 notice is {}.",
                result.notice_window_start.to_long_form(),
            ),
            tone: Tone::Caution,
            call_to_action: CallToAction::new("Set Calendar Reminder", CALENDAR_REMINDER_URL),
        },
        EligibilityStatus::OutsideNoticeWindow => StatusGuidance {
            headline: "Outside Notice Window".to_string(),
            message: "You're outside the notice window for this termination period.".to_string(),
            tone: Tone::Neutral,
            call_to_action: explore(),
        },
        EligibilityStatus::Expired => StatusGuidance {
            headline: "Termination Right Expired".to_string(),
            message: "Your termination window has expired. Unfortunately, you can no longer \
                      exercise your termination right for this work."
                .to_string(),
            tone: Tone::Negative,
            call_to_action: explore(),
        },
    }
}
