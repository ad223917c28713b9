//! Readme engine: remote client, progress ticker and the controller that
//! executes core effects.
mod client;
mod controller;
mod ticker;
mod types;

pub use client::{ClientSettings, HttpReadmeApi, ReadmeApi, DEFAULT_BASE_URL};
pub use controller::GenerationController;
pub use ticker::ProgressTicker;
pub use types::{
    ClientError, Envelope, GeneratedReadme, HealthStatus, PreviewHtml, RepositoryAnalysis,
    PREVIEW_FAILED_MESSAGE,
};
