use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{BreathPhase, TimerState};

/// Every state change in the engine produces an Event.
/// The host shell polls for events; there is no internal publish/subscribe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Dial moved to a new minute value while idle.
    MinutesSelected {
        minutes: u32,
        at: DateTime<Utc>,
    },
    SessionStarted {
        planned_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// The countdown reached zero on this tick. Fired exactly once per
    /// session; subsequent ticks accumulate overtime instead.
    SessionFinished {
        planned_secs: u32,
        at: DateTime<Utc>,
    },
    OvertimePaused {
        over_secs: u32,
        at: DateTime<Utc>,
    },
    OvertimeResumed {
        over_secs: u32,
        at: DateTime<Utc>,
    },
    MeditationStarted {
        /// How many meditations this session has seen, including this one.
        count: u32,
        at: DateTime<Utc>,
    },
    /// Breath phase rolled over (drives the UI transition haptic).
    BreathPhaseAdvanced {
        phase: BreathPhase,
        at: DateTime<Utc>,
    },
    MeditationEnded {
        /// True when the 64-second countdown ran out, false on skip.
        timed_out: bool,
        /// Seconds actually spent meditating, credited to the session.
        elapsed_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        selected_minutes: u32,
        remaining_secs: u32,
        over_secs: u32,
        overtime_paused: bool,
        meditating: bool,
        breath_phase: Option<BreathPhase>,
        meditation_remaining_secs: Option<u32>,
        progress: f64,
        over_progress: f64,
        display_time: String,
        at: DateTime<Utc>,
    },
}
