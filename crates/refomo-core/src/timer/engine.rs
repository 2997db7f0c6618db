//! Session timer engine.
//!
//! The engine is a tick-driven state machine. It does not own a timer -
//! the host is responsible for calling `tick()` once per second while a
//! session or a breathing break is live.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!           |
//!           v (countdown reaches 0)
//!        Completed (overtime counts up, pausable)
//! ```
//!
//! Any state returns to `Idle` via `reset()`. A breathing break can be
//! layered over `Running` or `Paused`; while it is live, ticks drive the
//! breath countdown and the main countdown stands still.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new();
//! engine.start();
//! // Once per second:
//! engine.tick(); // Returns Some(Event::SessionFinished) on the final tick
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::meditation::{Meditation, BREATH_PHASE_SECS, MEDITATION_SECS};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Session data handed to the review step on completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingRecord {
    pub start_time: DateTime<Utc>,
    /// Planned focus length in seconds.
    pub planned_duration: u32,
    /// Planned length plus accumulated overtime, in seconds.
    pub actual_duration: u32,
    pub goal: Option<String>,
    pub meditation_count: Option<u32>,
    pub meditation_seconds: Option<u32>,
}

/// Core session timer.
///
/// Tick-driven - no internal thread. Serializable so a host shell can
/// snapshot it between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    state: TimerState,
    /// Dial position while idle, 1-60.
    selected_minutes: u32,
    /// Seconds left in the planned countdown.
    remaining_secs: u32,
    /// Seconds elapsed past the planned duration.
    over_secs: u32,
    /// Only meaningful in `Completed`.
    #[serde(default)]
    overtime_paused: bool,
    planned_secs: u32,
    started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    goal: String,
    /// In-progress memo, autosaved by the coordinator.
    #[serde(default)]
    memo: String,
    /// Lookup key into the record store, set on first autosave. Never a
    /// live reference - the store reloads from disk on every operation.
    #[serde(default)]
    record_id: Option<Uuid>,
    #[serde(default)]
    meditation: Option<Meditation>,
    #[serde(default)]
    meditation_count: u32,
    #[serde(default)]
    meditation_secs: u32,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::with_selected_minutes(25)
    }
}

impl TimerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with the dial preset to `minutes` (clamped to 1-60).
    pub fn with_selected_minutes(minutes: u32) -> Self {
        Self {
            state: TimerState::Idle,
            selected_minutes: minutes.clamp(1, 60),
            remaining_secs: 0,
            over_secs: 0,
            overtime_paused: false,
            planned_secs: 0,
            started_at: None,
            goal: String::new(),
            memo: String::new(),
            record_id: None,
            meditation: None,
            meditation_count: 0,
            meditation_secs: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn selected_minutes(&self) -> u32 {
        self.selected_minutes
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn over_secs(&self) -> u32 {
        self.over_secs
    }

    pub fn is_overtime_paused(&self) -> bool {
        self.overtime_paused
    }

    pub fn planned_secs(&self) -> u32 {
        self.planned_secs
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn memo(&self) -> &str {
        &self.memo
    }

    pub fn record_id(&self) -> Option<Uuid> {
        self.record_id
    }

    pub fn is_meditating(&self) -> bool {
        self.meditation.is_some()
    }

    pub fn meditation(&self) -> Option<&Meditation> {
        self.meditation.as_ref()
    }

    pub fn meditation_count(&self) -> u32 {
        self.meditation_count
    }

    pub fn meditation_secs(&self) -> u32 {
        self.meditation_secs
    }

    /// Normalized fill of the planned portion of the dial.
    pub fn progress(&self) -> f64 {
        match self.state {
            TimerState::Idle => f64::from(self.selected_minutes) / 60.0,
            TimerState::Running | TimerState::Paused => f64::from(self.remaining_secs) / 3600.0,
            TimerState::Completed => 0.0,
        }
    }

    /// Normalized fill of the overtime arc, capped at one full turn.
    pub fn over_progress(&self) -> f64 {
        if self.state == TimerState::Completed {
            (f64::from(self.over_secs) / 3600.0).min(1.0)
        } else {
            0.0
        }
    }

    /// `MM:SS` countdown, or `+MM:SS` count-up once completed.
    pub fn display_time(&self) -> String {
        match self.state {
            TimerState::Idle => format!("{:02}:00", self.selected_minutes),
            TimerState::Running | TimerState::Paused => {
                format!("{:02}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
            }
            TimerState::Completed => {
                format!("+{:02}:{:02}", self.over_secs / 60, self.over_secs % 60)
            }
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            selected_minutes: self.selected_minutes,
            remaining_secs: self.remaining_secs,
            over_secs: self.over_secs,
            overtime_paused: self.overtime_paused,
            meditating: self.meditation.is_some(),
            breath_phase: self.meditation.as_ref().map(|m| m.phase),
            meditation_remaining_secs: self.meditation.as_ref().map(|m| m.remaining_secs),
            progress: self.progress(),
            over_progress: self.over_progress(),
            display_time: self.display_time(),
            at: Utc::now(),
        }
    }

    /// Package the session for the review step.
    ///
    /// Returns `None` if no session was ever started.
    pub fn create_pending_record(&self) -> Option<PendingRecord> {
        let start_time = self.started_at?;
        Some(PendingRecord {
            start_time,
            planned_duration: self.planned_secs,
            actual_duration: self.planned_secs.saturating_add(self.over_secs),
            goal: if self.goal.is_empty() {
                None
            } else {
                Some(self.goal.clone())
            },
            meditation_count: (self.meditation_count > 0).then_some(self.meditation_count),
            meditation_seconds: (self.meditation_secs > 0).then_some(self.meditation_secs),
        })
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Map a dial angle in degrees to a minute selection.
    ///
    /// Idle only. Negative angles wrap by +360. Returns `None` when the
    /// computed value equals the current selection, so the caller can skip
    /// redundant feedback.
    pub fn select_minutes_by_angle(&mut self, angle_deg: f64) -> Option<Event> {
        if self.state != TimerState::Idle {
            return None;
        }
        let normalized = if angle_deg < 0.0 {
            angle_deg + 360.0
        } else {
            angle_deg
        };
        let minutes = ((normalized / 6.0).round() as i64).clamp(1, 60) as u32;
        self.apply_selection(minutes)
    }

    /// Set the dial directly. Idle only, clamped to 1-60.
    pub fn set_selected_minutes(&mut self, minutes: u32) -> Option<Event> {
        if self.state != TimerState::Idle {
            return None;
        }
        self.apply_selection(minutes.clamp(1, 60))
    }

    pub fn start(&mut self) -> Option<Event> {
        if self.state != TimerState::Idle {
            return None;
        }
        self.started_at = Some(Utc::now());
        self.planned_secs = self.selected_minutes * 60;
        self.remaining_secs = self.planned_secs;
        self.state = TimerState::Running;
        Some(Event::SessionStarted {
            planned_secs: self.planned_secs,
            at: Utc::now(),
        })
    }

    /// One action for the single main button: start, pause, resume, or
    /// flip the overtime pause, depending on the current state.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.meditation.is_some() {
            return None;
        }
        match self.state {
            TimerState::Idle => self.start(),
            TimerState::Running => self.pause(),
            TimerState::Paused => self.resume(),
            TimerState::Completed => {
                if self.overtime_paused {
                    self.resume()
                } else {
                    self.pause()
                }
            }
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        if self.meditation.is_some() {
            return None;
        }
        match self.state {
            TimerState::Running => {
                self.state = TimerState::Paused;
                Some(Event::TimerPaused {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            TimerState::Completed if !self.overtime_paused => {
                self.overtime_paused = true;
                Some(Event::OvertimePaused {
                    over_secs: self.over_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn resume(&mut self) -> Option<Event> {
        if self.meditation.is_some() {
            return None;
        }
        match self.state {
            TimerState::Paused => {
                self.state = TimerState::Running;
                Some(Event::TimerResumed {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            TimerState::Completed if self.overtime_paused => {
                self.overtime_paused = false;
                Some(Event::OvertimeResumed {
                    over_secs: self.over_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Once-per-second heartbeat.
    ///
    /// Returns `Some(Event::SessionFinished)` on the tick that empties the
    /// planned countdown - exactly once per session. During a breathing
    /// break, ticks drive the breath countdown instead.
    pub fn tick(&mut self) -> Option<Event> {
        if self.meditation.is_some() {
            return self.meditation_tick();
        }
        match self.state {
            TimerState::Running => {
                self.remaining_secs = self.remaining_secs.saturating_sub(1);
                if self.remaining_secs == 0 {
                    self.state = TimerState::Completed;
                    self.overtime_paused = false;
                    return Some(Event::SessionFinished {
                        planned_secs: self.planned_secs,
                        at: Utc::now(),
                    });
                }
                None
            }
            TimerState::Completed if !self.overtime_paused => {
                self.over_secs = self.over_secs.saturating_add(1);
                None
            }
            _ => None,
        }
    }

    /// Return to `Idle`, clearing every transient session field.
    ///
    /// A live breathing break is force-ended; its time is discarded along
    /// with the rest of the session counters.
    pub fn reset(&mut self) -> Option<Event> {
        self.meditation = None;
        self.state = TimerState::Idle;
        self.remaining_secs = 0;
        self.over_secs = 0;
        self.overtime_paused = false;
        self.planned_secs = 0;
        self.started_at = None;
        self.goal.clear();
        self.memo.clear();
        self.record_id = None;
        self.meditation_count = 0;
        self.meditation_secs = 0;
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Begin a breathing break. Running or Paused only, not re-entrant.
    ///
    /// Counts toward `meditation_count` immediately, whether or not the
    /// break later completes.
    pub fn start_meditation(&mut self) -> Option<Event> {
        if self.meditation.is_some() {
            return None;
        }
        if !matches!(self.state, TimerState::Running | TimerState::Paused) {
            return None;
        }
        self.meditation = Some(Meditation::begin());
        self.meditation_count += 1;
        Some(Event::MeditationStarted {
            count: self.meditation_count,
            at: Utc::now(),
        })
    }

    /// End the breathing break early, crediting only the elapsed seconds.
    pub fn skip_meditation(&mut self) -> Option<Event> {
        self.end_meditation(false)
    }

    pub fn set_goal(&mut self, text: impl Into<String>) {
        self.goal = text.into();
    }

    pub fn set_memo(&mut self, text: impl Into<String>) {
        self.memo = text.into();
    }

    /// Associate the session with a stored record (set on first autosave).
    pub fn set_record_id(&mut self, id: Uuid) {
        self.record_id = Some(id);
    }

    pub fn clear_record_id(&mut self) {
        self.record_id = None;
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn apply_selection(&mut self, minutes: u32) -> Option<Event> {
        if minutes == self.selected_minutes {
            return None;
        }
        self.selected_minutes = minutes;
        Some(Event::MinutesSelected {
            minutes,
            at: Utc::now(),
        })
    }

    fn meditation_tick(&mut self) -> Option<Event> {
        let m = self.meditation.as_mut()?;
        m.remaining_secs = m.remaining_secs.saturating_sub(1);
        if m.remaining_secs == 0 {
            return self.end_meditation(true);
        }
        m.phase_remaining_secs -= 1;
        if m.phase_remaining_secs == 0 {
            m.phase = m.phase.next();
            m.phase_remaining_secs = BREATH_PHASE_SECS;
            return Some(Event::BreathPhaseAdvanced {
                phase: m.phase,
                at: Utc::now(),
            });
        }
        None
    }

    fn end_meditation(&mut self, timed_out: bool) -> Option<Event> {
        let m = self.meditation.take()?;
        let elapsed = MEDITATION_SECS - m.remaining_secs;
        self.meditation_secs = self.meditation_secs.saturating_add(elapsed);
        Some(Event::MeditationEnded {
            timed_out,
            elapsed_secs: elapsed,
            at: Utc::now(),
        })
    }
}
