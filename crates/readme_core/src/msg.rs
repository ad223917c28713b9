use crate::{AttemptId, GenerationResult, GenerationStage, RepositoryInfo};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User submitted a (validated) repository URL.
    GenerateRequested { url: String },
    /// User asked to go back to the input form.
    ResetRequested,
    /// Simulated-progress ticker fired for the given phase.
    ProgressTick {
        attempt: AttemptId,
        stage: GenerationStage,
    },
    /// Analyze call settled.
    AnalyzeFinished {
        attempt: AttemptId,
        outcome: CallOutcome<RepositoryInfo>,
    },
    /// Generate call settled.
    GenerateFinished {
        attempt: AttemptId,
        outcome: CallOutcome<GenerationResult>,
    },
}

/// Settled result of one remote call as seen by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome<T> {
    Success(T),
    /// The remote side (or the transport) reported a failure.
    Failure { error: Option<String> },
    /// The call sequence itself blew up before producing a result.
    Crashed { reason: Option<String> },
}
