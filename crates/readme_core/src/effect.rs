use std::time::Duration;

use crate::{AttemptId, GenerationStage};

/// Side effects requested by [`crate::update`]. The runtime executes them and
/// feeds the results back as [`crate::Msg`]s tagged with the same attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start a repeating progress ticker for one phase, replacing any ticker
    /// still running.
    StartTicker {
        attempt: AttemptId,
        stage: GenerationStage,
        interval: Duration,
    },
    /// Cancel the running progress ticker, if any.
    StopTicker,
    /// Issue the analyze call for the repository.
    Analyze { attempt: AttemptId, url: String },
    /// Issue the generate call for the repository.
    Generate { attempt: AttemptId, url: String },
}
