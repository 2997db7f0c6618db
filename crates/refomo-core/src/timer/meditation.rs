use serde::{Deserialize, Serialize};

/// Total length of one breathing break, in seconds (four 16-second cycles).
pub const MEDITATION_SECS: u32 = 64;

/// Length of one breath phase, in seconds.
pub const BREATH_PHASE_SECS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreathPhase {
    Inhale,
    HoldIn,
    Exhale,
    HoldOut,
}

impl BreathPhase {
    pub fn next(self) -> Self {
        match self {
            BreathPhase::Inhale => BreathPhase::HoldIn,
            BreathPhase::HoldIn => BreathPhase::Exhale,
            BreathPhase::Exhale => BreathPhase::HoldOut,
            BreathPhase::HoldOut => BreathPhase::Inhale,
        }
    }
}

/// Live breathing-break sub-state.
///
/// Held in an `Option` on the engine and replaced as a unit, so the phase
/// countdown, total countdown, and the "meditating" fact can never drift
/// apart. While this is `Some`, ticks route here and the main countdown
/// stands still.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meditation {
    pub phase: BreathPhase,
    /// Seconds left in the current phase (counts down from 4).
    pub phase_remaining_secs: u32,
    /// Seconds left in the whole break (counts down from 64).
    pub remaining_secs: u32,
}

impl Meditation {
    pub fn begin() -> Self {
        Self {
            phase: BreathPhase::Inhale,
            phase_remaining_secs: BREATH_PHASE_SECS,
            remaining_secs: MEDITATION_SECS,
        }
    }

    /// Seconds spent meditating so far.
    pub fn elapsed_secs(&self) -> u32 {
        MEDITATION_SECS - self.remaining_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_cycle() {
        let mut phase = BreathPhase::Inhale;
        let expected = [
            BreathPhase::HoldIn,
            BreathPhase::Exhale,
            BreathPhase::HoldOut,
            BreathPhase::Inhale,
        ];
        for want in expected {
            phase = phase.next();
            assert_eq!(phase, want);
        }
    }

    #[test]
    fn begin_is_full_countdown() {
        let m = Meditation::begin();
        assert_eq!(m.phase, BreathPhase::Inhale);
        assert_eq!(m.remaining_secs, 64);
        assert_eq!(m.phase_remaining_secs, 4);
        assert_eq!(m.elapsed_secs(), 0);
    }
}
