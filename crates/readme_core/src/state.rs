use crate::view_model::GenerationView;
use crate::ProgressSettings;

pub type AttemptId = u64;

pub const ANALYZE_FAILED_MESSAGE: &str = "Failed to analyze repository";
pub const GENERATE_FAILED_MESSAGE: &str = "Failed to generate README";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationStage {
    #[default]
    Idle,
    Analyzing,
    Generating,
    Complete,
    Error,
}

impl GenerationStage {
    /// True while a remote call of the current attempt is in flight.
    pub fn is_busy(self) -> bool {
        matches!(self, GenerationStage::Analyzing | GenerationStage::Generating)
    }
}

/// Generated document, its rendered markup and the server's status note.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationResult {
    pub markdown: String,
    pub html: String,
    pub message: Option<String>,
}

/// Repository metadata returned by the analyze phase.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RepositoryInfo {
    pub name: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stars: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    stage: GenerationStage,
    progress: u8,
    result: Option<GenerationResult>,
    error: Option<String>,
    repository: Option<RepositoryInfo>,
    url: Option<String>,
    attempt: AttemptId,
    settings: ProgressSettings,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: ProgressSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn view(&self) -> GenerationView {
        let result = self.result.as_ref();
        GenerationView {
            stage: self.stage,
            progress: self.progress,
            markdown: result.map(|r| r.markdown.clone()).unwrap_or_default(),
            html: result.map(|r| r.html.clone()).unwrap_or_default(),
            message: result.and_then(|r| r.message.clone()).unwrap_or_default(),
            error: self.error.clone().unwrap_or_default(),
            repository: self.repository.clone(),
            url: self.url.clone(),
        }
    }

    pub fn stage(&self) -> GenerationStage {
        self.stage
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn attempt(&self) -> AttemptId {
        self.attempt
    }

    pub fn settings(&self) -> &ProgressSettings {
        &self.settings
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        was_dirty
    }

    pub(crate) fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Opens a new attempt and returns its id. Every earlier attempt becomes stale.
    pub(crate) fn begin_attempt(&mut self, url: String) -> AttemptId {
        self.attempt += 1;
        self.stage = GenerationStage::Analyzing;
        self.progress = self.settings.analyze.start;
        self.result = None;
        self.error = None;
        self.repository = None;
        self.url = Some(url);
        self.dirty = true;
        self.attempt
    }

    pub(crate) fn enter_generating(&mut self, repository: RepositoryInfo) {
        self.stage = GenerationStage::Generating;
        self.progress = self.settings.generate.start;
        self.repository = Some(repository);
        self.dirty = true;
    }

    pub(crate) fn complete(&mut self, result: GenerationResult) {
        self.stage = GenerationStage::Complete;
        self.progress = crate::PROGRESS_COMPLETE;
        self.result = Some(result);
        self.error = None;
        self.dirty = true;
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.stage = GenerationStage::Error;
        self.progress = 0;
        self.result = None;
        self.error = Some(message);
        self.dirty = true;
    }

    /// Applies one simulated-progress step for the active phase.
    pub(crate) fn tick_progress(&mut self) {
        let phase = match self.stage {
            GenerationStage::Analyzing => self.settings.analyze,
            GenerationStage::Generating => self.settings.generate,
            _ => return,
        };
        let next = phase.advance(self.progress);
        if next != self.progress {
            self.progress = next;
            self.dirty = true;
        }
    }

    /// Back to the input form. The attempt counter moves on so that anything
    /// still in flight for the old attempt is discarded when it lands.
    pub(crate) fn reset(&mut self) {
        self.attempt += 1;
        self.stage = GenerationStage::Idle;
        self.progress = 0;
        self.result = None;
        self.error = None;
        self.repository = None;
        self.url = None;
        self.dirty = true;
    }
}
