use crate::{GenerationStage, RepositoryInfo};

/// Snapshot handed to the presentation layer. Empty strings stand for
/// "nothing yet" so renderers never deal with missing fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationView {
    pub stage: GenerationStage,
    pub progress: u8,
    pub markdown: String,
    pub html: String,
    pub message: String,
    pub error: String,
    pub repository: Option<RepositoryInfo>,
    pub url: Option<String>,
}

impl GenerationView {
    pub fn is_busy(&self) -> bool {
        self.stage.is_busy()
    }
}
