use readme_core::{GenerationStage, GenerationView, RepoSlug, RepositoryInfo, EXAMPLE_URLS};

use super::constants::*;
use super::text::html_to_text;

/// The four mutually exclusive screens, keyed by stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Input,
    Progress,
    Failure,
    Result,
}

impl Screen {
    pub fn for_stage(stage: GenerationStage) -> Self {
        match stage {
            GenerationStage::Idle => Screen::Input,
            GenerationStage::Analyzing | GenerationStage::Generating => Screen::Progress,
            GenerationStage::Error => Screen::Failure,
            GenerationStage::Complete => Screen::Result,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ResultTab {
    #[default]
    Preview,
    Markdown,
}

pub fn render(view: &GenerationView, tab: ResultTab) -> Vec<String> {
    match Screen::for_stage(view.stage) {
        Screen::Input => render_input(),
        Screen::Progress => render_progress_card(view),
        Screen::Failure => {
            let mut lines = render_progress_card(view);
            lines.push(String::new());
            lines.push(format!("Error: {}", view.error));
            lines
        }
        Screen::Result => {
            let mut lines = render_progress_card(view);
            lines.push(String::new());
            lines.extend(render_result(view, tab));
            lines
        }
    }
}

/// Single-line status used to repaint progress between full renders.
pub fn progress_line(view: &GenerationView) -> String {
    let label = stage_label(view.stage).label;
    format!("{label} {} {}%", progress_bar(view.progress), view.progress)
}

fn render_input() -> Vec<String> {
    let mut lines = vec![
        HERO_TITLE.to_string(),
        HERO_SUBTITLE.to_string(),
        String::new(),
        format!("Repository URL (e.g. {INPUT_PLACEHOLDER})"),
        String::new(),
        EXAMPLES_HEADER.to_string(),
    ];
    lines.extend(EXAMPLE_URLS.iter().map(|url| {
        let label = RepoSlug::parse(url).map(|slug| slug.to_string());
        format!("  {:<16} {url}", label.unwrap_or_default())
    }));
    lines
}

fn render_progress_card(view: &GenerationView) -> Vec<String> {
    let config = stage_label(view.stage);
    let mut header = config.label.to_string();
    if view.progress > 0 && view.stage != GenerationStage::Error {
        header.push_str(&format!("  {}%", view.progress));
    }

    let mut lines = vec![header, config.description.to_string()];
    if let Some(url) = &view.url {
        lines.push(format!("Repository: {url}"));
    }
    if let Some(info) = view.repository.as_ref().and_then(repository_summary) {
        lines.push(info);
    }
    if view.stage != GenerationStage::Error {
        let status = if view.stage == GenerationStage::Complete {
            "Completed"
        } else {
            "In Progress"
        };
        lines.push(progress_bar(view.progress));
        lines.push(format!("Started{status:>width$}", width = PROGRESS_BAR_WIDTH - 5));
    }
    if view.stage == GenerationStage::Complete {
        lines.push(NOTICE_COMPLETE.to_string());
        if !view.message.is_empty() {
            lines.push(view.message.clone());
        }
    }
    lines
}

fn render_result(view: &GenerationView, tab: ResultTab) -> Vec<String> {
    let (preview_marker, markdown_marker) = match tab {
        ResultTab::Preview => ("[Preview]", " Markdown "),
        ResultTab::Markdown => (" Preview ", "[Markdown]"),
    };
    let mut lines = vec![
        "Your README".to_string(),
        format!("{preview_marker} {markdown_marker}"),
        String::new(),
    ];
    match tab {
        ResultTab::Preview => {
            let text = html_to_text(&view.html);
            if text.is_empty() {
                lines.push(NO_PREVIEW.to_string());
            } else {
                lines.extend(text);
            }
        }
        ResultTab::Markdown => {
            if view.markdown.is_empty() {
                lines.push(NO_MARKDOWN.to_string());
            } else {
                lines.extend(view.markdown.lines().map(str::to_string));
            }
        }
    }
    lines
}

fn repository_summary(info: &RepositoryInfo) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(name) = &info.name {
        parts.push(name.clone());
    }
    if let Some(language) = &info.language {
        parts.push(language.clone());
    }
    if let Some(stars) = info.stars {
        parts.push(format!("★ {stars}"));
    }
    let mut summary = parts.join(" · ");
    if let Some(description) = info.description.as_deref().filter(|d| !d.is_empty()) {
        if summary.is_empty() {
            summary = description.to_string();
        } else {
            summary.push_str(&format!(" ({description})"));
        }
    }
    (!summary.is_empty()).then_some(summary)
}

fn progress_bar(progress: u8) -> String {
    let clamped = usize::from(progress.min(100));
    let filled = clamped * PROGRESS_BAR_WIDTH / 100;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled)
    )
}
