mod engine;
mod meditation;

pub use engine::{PendingRecord, TimerEngine, TimerState};
pub use meditation::{BreathPhase, Meditation, BREATH_PHASE_SECS, MEDITATION_SECS};
