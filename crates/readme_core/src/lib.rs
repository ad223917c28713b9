//! Readme core: pure generation state machine and view-model helpers.
mod effect;
mod msg;
mod progress;
mod state;
mod update;
mod validate;
mod view_model;

pub use effect::Effect;
pub use msg::{CallOutcome, Msg};
pub use progress::{PhaseProgress, ProgressSettings, PROGRESS_COMPLETE};
pub use state::{
    AppState, AttemptId, GenerationResult, GenerationStage, RepositoryInfo,
    ANALYZE_FAILED_MESSAGE, GENERATE_FAILED_MESSAGE, UNEXPECTED_ERROR_MESSAGE,
};
pub use update::update;
pub use validate::{is_valid_github_url, RepoSlug, EXAMPLE_URLS, INVALID_URL_MESSAGE};
pub use view_model::GenerationView;
