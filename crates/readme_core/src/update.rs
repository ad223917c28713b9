use crate::{
    AppState, CallOutcome, Effect, GenerationStage, Msg, ANALYZE_FAILED_MESSAGE,
    GENERATE_FAILED_MESSAGE, UNEXPECTED_ERROR_MESSAGE,
};

/// Pure update function: applies a message to state and returns any effects.
///
/// Messages tagged with an attempt other than the current one are dropped
/// without touching state, which is what keeps late ticks and late remote
/// completions from resurrecting an attempt that was reset or superseded.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::GenerateRequested { url } => {
            // One attempt at a time; the caller is expected to disable submit while busy.
            if state.stage().is_busy() {
                return (state, Vec::new());
            }
            let interval = state.settings().interval;
            let attempt = state.begin_attempt(url.clone());
            vec![
                Effect::StartTicker {
                    attempt,
                    stage: GenerationStage::Analyzing,
                    interval,
                },
                Effect::Analyze { attempt, url },
            ]
        }
        Msg::ResetRequested => {
            state.reset();
            vec![Effect::StopTicker]
        }
        Msg::ProgressTick { attempt, stage } => {
            if attempt == state.attempt() && stage == state.stage() {
                state.tick_progress();
            }
            Vec::new()
        }
        Msg::AnalyzeFinished { attempt, outcome } => {
            if attempt != state.attempt() || state.stage() != GenerationStage::Analyzing {
                return (state, Vec::new());
            }
            match outcome {
                CallOutcome::Success(repository) => {
                    state.enter_generating(repository);
                    let url = state.url().unwrap_or_default().to_string();
                    vec![
                        Effect::StopTicker,
                        Effect::StartTicker {
                            attempt,
                            stage: GenerationStage::Generating,
                            interval: state.settings().interval,
                        },
                        Effect::Generate { attempt, url },
                    ]
                }
                failure => {
                    state.fail(failure_message(failure, ANALYZE_FAILED_MESSAGE));
                    vec![Effect::StopTicker]
                }
            }
        }
        Msg::GenerateFinished { attempt, outcome } => {
            if attempt != state.attempt() || state.stage() != GenerationStage::Generating {
                return (state, Vec::new());
            }
            match outcome {
                CallOutcome::Success(result) => state.complete(result),
                failure => state.fail(failure_message(failure, GENERATE_FAILED_MESSAGE)),
            }
            vec![Effect::StopTicker]
        }
    };

    (state, effects)
}

fn failure_message<T>(outcome: CallOutcome<T>, fallback: &str) -> String {
    match outcome {
        CallOutcome::Failure { error } => non_empty(error).unwrap_or_else(|| fallback.to_string()),
        CallOutcome::Crashed { reason } => {
            non_empty(reason).unwrap_or_else(|| UNEXPECTED_ERROR_MESSAGE.to_string())
        }
        CallOutcome::Success(_) => fallback.to_string(),
    }
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.is_empty())
}
