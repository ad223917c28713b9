use readme_core::GenerationStage;

pub const HERO_TITLE: &str = "Generate Professional READMEs";
pub const HERO_SUBTITLE: &str =
    "Transform any GitHub repository into a comprehensive README with AI-powered analysis";
pub const INPUT_PLACEHOLDER: &str = "https://github.com/username/repository";
pub const EXAMPLES_HEADER: &str = "Try these examples:";

pub const NOTICE_STARTING: &str = "Starting README generation...";
pub const NOTICE_RESET: &str = "Ready for a new README!";
pub const NOTICE_DOWNLOADED: &str = "README.md downloaded!";
pub const NOTICE_COMPLETE: &str = "README generated successfully!";

pub const NO_PREVIEW: &str = "No preview available";
pub const NO_MARKDOWN: &str = "No markdown content available";

pub const PROGRESS_BAR_WIDTH: usize = 30;

pub struct StageLabel {
    pub label: &'static str,
    pub description: &'static str,
}

pub fn stage_label(stage: GenerationStage) -> StageLabel {
    let (label, description) = match stage {
        GenerationStage::Idle => ("Ready", "Enter a GitHub URL to start"),
        GenerationStage::Analyzing => (
            "Analyzing Repository",
            "Scanning repository structure and content...",
        ),
        GenerationStage::Generating => {
            ("Generating README", "Creating your professional README...")
        }
        GenerationStage::Complete => ("Complete!", "Your README is ready"),
        GenerationStage::Error => ("Error", "Something went wrong"),
    };
    StageLabel { label, description }
}
