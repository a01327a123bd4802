//! Timer state structure and the work/break state machine

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Default work session length (50 minutes)
pub const DEFAULT_WORK_SECONDS: u32 = 3000;
/// Default break session length (10 minutes)
pub const DEFAULT_BREAK_SECONDS: u32 = 600;

/// Accepted work duration in minutes
pub const WORK_MINUTES: RangeInclusive<u32> = 1..=120;
/// Accepted break duration in minutes
pub const BREAK_MINUTES: RangeInclusive<u32> = 1..=60;

/// Which kind of session the countdown belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Work,
    Break,
}

impl SessionKind {
    /// The session that follows this one
    pub fn opposite(self) -> Self {
        match self {
            SessionKind::Work => SessionKind::Break,
            SessionKind::Break => SessionKind::Work,
        }
    }

    /// Valid duration range in minutes for this session kind
    pub fn minutes_range(self) -> RangeInclusive<u32> {
        match self {
            SessionKind::Work => WORK_MINUTES,
            SessionKind::Break => BREAK_MINUTES,
        }
    }
}

/// Clamp a minute count into `range` and convert it to seconds
pub fn clamp_minutes(minutes: u32, range: RangeInclusive<u32>) -> u32 {
    minutes.clamp(*range.start(), *range.end()) * 60
}

/// Configured session durations, always within their valid ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub work_duration_seconds: u32,
    pub break_duration_seconds: u32,
}

impl TimerConfig {
    /// Build a configuration from minute counts, clamping both
    pub fn from_minutes(work_minutes: u32, break_minutes: u32) -> Self {
        Self {
            work_duration_seconds: clamp_minutes(work_minutes, WORK_MINUTES),
            break_duration_seconds: clamp_minutes(break_minutes, BREAK_MINUTES),
        }
    }

    /// Full duration of a session of the given kind
    pub fn duration_of(&self, kind: SessionKind) -> u32 {
        match kind {
            SessionKind::Work => self.work_duration_seconds,
            SessionKind::Break => self.break_duration_seconds,
        }
    }

    fn set_duration(&mut self, kind: SessionKind, minutes: u32) -> u32 {
        let seconds = clamp_minutes(minutes, kind.minutes_range());
        match kind {
            SessionKind::Work => self.work_duration_seconds = seconds,
            SessionKind::Break => self.break_duration_seconds = seconds,
        }
        seconds
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_duration_seconds: DEFAULT_WORK_SECONDS,
            break_duration_seconds: DEFAULT_BREAK_SECONDS,
        }
    }
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was not running; nothing changed
    Idle,
    /// One second elapsed and the session continues
    Counting { remaining_seconds: u32 },
    /// The session ran out; the timer is stopped on the next session
    Completed { finished: SessionKind, next: SessionKind },
}

/// Countdown state.
///
/// Holds the two orthogonal axes (session kind and run state) plus the
/// remaining time. `remaining_seconds` never exceeds the duration of the
/// active session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    remaining_seconds: u32,
    is_running: bool,
    session: SessionKind,
    config: TimerConfig,
}

impl TimerState {
    /// Create a stopped work session with the full work duration
    pub fn new(config: TimerConfig) -> Self {
        Self {
            remaining_seconds: config.work_duration_seconds,
            is_running: false,
            session: SessionKind::Work,
            config,
        }
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn session(&self) -> SessionKind {
        self.session
    }

    pub fn is_work_session(&self) -> bool {
        self.session == SessionKind::Work
    }

    pub fn config(&self) -> TimerConfig {
        self.config
    }

    /// Full duration of the active session
    pub fn session_duration(&self) -> u32 {
        self.config.duration_of(self.session)
    }

    /// Mark the timer as running. Returns `false` if it already was.
    pub fn start(&mut self) -> bool {
        if self.is_running {
            return false;
        }
        if self.remaining_seconds == 0 {
            self.remaining_seconds = self.session_duration();
        }
        self.is_running = true;
        true
    }

    /// Stop the timer keeping the remaining time. Returns `true` if it was running.
    pub fn pause(&mut self) -> bool {
        std::mem::replace(&mut self.is_running, false)
    }

    /// Stop and refill the current session
    pub fn reset(&mut self) {
        self.is_running = false;
        self.remaining_seconds = self.session_duration();
    }

    /// Stop and move to the full duration of the opposite session
    pub fn skip_session(&mut self) {
        self.is_running = false;
        self.session = self.session.opposite();
        self.remaining_seconds = self.session_duration();
    }

    /// Store a new duration for `kind`, returning the clamped value in seconds.
    ///
    /// A stopped timer on that session picks up the new duration at once. A
    /// running one only shortens if it would otherwise exceed it.
    pub fn set_duration(&mut self, kind: SessionKind, minutes: u32) -> u32 {
        let seconds = self.config.set_duration(kind, minutes);
        if self.session == kind && (!self.is_running || self.remaining_seconds > seconds) {
            self.remaining_seconds = seconds;
        }
        seconds
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running {
            return TickOutcome::Idle;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return TickOutcome::Counting {
                remaining_seconds: self.remaining_seconds,
            };
        }

        let finished = self.session;
        self.skip_session();
        TickOutcome::Completed {
            finished,
            next: self.session,
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(TimerConfig::default())
    }
}
