//! Display formatting and draft-value handling for the widget

use serde::{Deserialize, Serialize};

use crate::state::{SessionKind, TimerState};

/// Format a second count as zero-padded `MM:SS`
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Human label for a session kind
pub fn session_label(kind: SessionKind) -> &'static str {
    match kind {
        SessionKind::Work => "Work",
        SessionKind::Break => "Break",
    }
}

/// Everything the page needs to render one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerView {
    pub clock: String,
    pub session_label: String,
    pub session: SessionKind,
    pub is_work_session: bool,
    pub is_running: bool,
    pub remaining_seconds: u32,
    pub work_minutes: u32,
    pub break_minutes: u32,
}

impl TimerView {
    pub fn from_state(state: &TimerState) -> Self {
        let config = state.config();
        Self {
            clock: format_clock(state.remaining_seconds()),
            session_label: session_label(state.session()).to_string(),
            session: state.session(),
            is_work_session: state.is_work_session(),
            is_running: state.is_running(),
            remaining_seconds: state.remaining_seconds(),
            work_minutes: config.work_duration_seconds / 60,
            break_minutes: config.break_duration_seconds / 60,
        }
    }
}

/// A draft value as typed into a duration field
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DraftValue {
    Number(f64),
    Text(String),
}

impl DraftValue {
    /// Minutes to commit, or `None` when the draft should be discarded
    pub fn minutes(&self) -> Option<u32> {
        match self {
            DraftValue::Number(value) => minutes_from_f64(*value),
            DraftValue::Text(text) => parse_draft_minutes(text),
        }
    }
}

/// Parse a committed draft into whole minutes.
///
/// Decimals truncate toward zero and negatives become 0; the engine then
/// clamps into the valid range. Blank or non-numeric drafts yield `None`.
pub fn parse_draft_minutes(text: &str) -> Option<u32> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().and_then(minutes_from_f64)
}

fn minutes_from_f64(value: f64) -> Option<u32> {
    if !value.is_finite() {
        return None;
    }
    // `as` saturates, so huge drafts land on u32::MAX and get clamped later
    Some(value.trunc().max(0.0) as u32)
}
