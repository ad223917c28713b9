use std::time::Duration;

pub const PROGRESS_COMPLETE: u8 = 100;

/// Tuning of the simulated progress for one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseProgress {
    /// Value set when the phase begins.
    pub start: u8,
    /// Increment applied on every tick.
    pub step: u8,
    /// Upper bound reached while the phase's call is still in flight.
    pub cap: u8,
}

impl PhaseProgress {
    /// Next value after one tick. Never exceeds `cap`, never decreases.
    pub fn advance(&self, current: u8) -> u8 {
        if current >= self.cap {
            return current;
        }
        current.saturating_add(self.step).min(self.cap)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSettings {
    pub interval: Duration,
    pub analyze: PhaseProgress,
    pub generate: PhaseProgress,
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(300),
            analyze: PhaseProgress {
                start: 10,
                step: 10,
                cap: 40,
            },
            generate: PhaseProgress {
                start: 50,
                step: 5,
                cap: 90,
            },
        }
    }
}
