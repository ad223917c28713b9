use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use readme_core::{
    is_valid_github_url, GenerationStage, GenerationView, EXAMPLE_URLS, INVALID_URL_MESSAGE,
};
use readme_engine::{
    Envelope, GenerationController, HttpReadmeApi, ReadmeApi, PREVIEW_FAILED_MESSAGE,
};
use readme_logging::{readme_error, readme_info};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use super::cli::{Cli, Command};
use super::export::{copy_readme, download_readme};
use super::logging;
use super::ui;
use super::ui::constants::{NOTICE_DOWNLOADED, NOTICE_RESET, NOTICE_STARTING, NO_PREVIEW};
use super::ui::render::{ResultTab, Screen};

const EXIT_INVALID_INPUT: u8 = 2;

pub async fn run_app() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::initialize(cli.log, &cli.log_file);

    let settings = cli.client_settings();
    readme_info!("using backend {}", settings.base_url);
    let api: Arc<dyn ReadmeApi> =
        Arc::new(HttpReadmeApi::new(settings).context("failed to build backend client")?);

    let command = cli.command.unwrap_or(Command::Interactive { out: None });
    match command {
        Command::Generate {
            url,
            out,
            copy,
            tab,
        } => generate_once(api, &url, out.as_deref(), copy, tab).await,
        Command::Interactive { out } => {
            let out_dir = match out {
                Some(dir) => dir,
                None => std::env::current_dir().context("cannot resolve current directory")?,
            };
            interactive(api, &out_dir).await
        }
        Command::Preview { file } => preview_file(api.as_ref(), &file).await,
        Command::Health => {
            let health = api.health().await;
            println!("Backend status: {}", health.status);
            Ok(if health.is_degraded() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Command::Examples => {
            for url in EXAMPLE_URLS {
                println!("{url}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Repaints the controller's view onto a writer: the full screen whenever the
/// stage changes, a single progress line when only the percentage moved.
struct Painter {
    out: Box<dyn Write>,
    last_stage: Option<GenerationStage>,
    tab: ResultTab,
}

impl Painter {
    fn new(out: Box<dyn Write>, tab: ResultTab) -> Self {
        Self {
            out,
            last_stage: None,
            tab,
        }
    }

    fn paint(&mut self, controller: &mut GenerationController) -> io::Result<()> {
        if !controller.consume_dirty() && self.last_stage.is_some() {
            return Ok(());
        }
        let view = controller.view();
        if self.last_stage == Some(view.stage) {
            if view.is_busy() {
                writeln!(self.out, "{}", ui::render::progress_line(&view))?;
            }
        } else {
            self.full(&view)?;
        }
        self.last_stage = Some(view.stage);
        self.out.flush()
    }

    fn full(&mut self, view: &GenerationView) -> io::Result<()> {
        writeln!(self.out)?;
        for line in ui::render::render(view, self.tab) {
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }

    fn notice(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "» {text}")?;
        self.out.flush()
    }
}

/// Submits `url` and repaints until the attempt settles.
async fn drive(
    controller: &mut GenerationController,
    painter: &mut Painter,
    url: &str,
) -> io::Result<GenerationView> {
    painter.notice(NOTICE_STARTING)?;
    controller.start_generation(url);
    painter.paint(controller)?;
    while controller.stage().is_busy() {
        controller.next_transition().await;
        painter.paint(controller)?;
    }
    Ok(controller.view())
}

async fn generate_once(
    api: Arc<dyn ReadmeApi>,
    url: &str,
    out_dir: Option<&Path>,
    copy: bool,
    tab: ResultTab,
) -> anyhow::Result<ExitCode> {
    let url = url.trim();
    if !is_valid_github_url(url) {
        eprintln!("{INVALID_URL_MESSAGE}");
        return Ok(ExitCode::from(EXIT_INVALID_INPUT));
    }

    // With --copy the screens move to stderr so stdout carries only markdown.
    let screen: Box<dyn Write> = if copy {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };
    let mut painter = Painter::new(screen, tab);
    let mut controller = GenerationController::new(api);
    let view = drive(&mut controller, &mut painter, url).await?;

    if view.stage != GenerationStage::Complete {
        return Ok(ExitCode::FAILURE);
    }
    if let Some(dir) = out_dir {
        let path = download_readme(dir, &view.markdown)
            .with_context(|| format!("failed to write README.md into {}", dir.display()))?;
        readme_info!("README written to {}", path.display());
        painter.notice(&format!("{NOTICE_DOWNLOADED} ({})", path.display()))?;
    }
    if copy {
        copy_readme(&mut io::stdout().lock(), &view.markdown)?;
    }
    Ok(ExitCode::SUCCESS)
}

enum Action {
    Copy,
    Download,
    Tab(ResultTab),
    Retry,
    New,
    Quit,
}

fn parse_action(input: &str) -> Option<Action> {
    match input.trim().to_ascii_lowercase().as_str() {
        "c" | "copy" => Some(Action::Copy),
        "d" | "download" => Some(Action::Download),
        "p" | "preview" => Some(Action::Tab(ResultTab::Preview)),
        "m" | "markdown" => Some(Action::Tab(ResultTab::Markdown)),
        "r" | "retry" => Some(Action::Retry),
        "n" | "new" | "" => Some(Action::New),
        "q" | "quit" => Some(Action::Quit),
        _ => None,
    }
}

async fn prompt(lines: &mut Lines<BufReader<Stdin>>, text: &str) -> io::Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;
    lines.next_line().await
}

async fn interactive(api: Arc<dyn ReadmeApi>, out_dir: &Path) -> anyhow::Result<ExitCode> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut painter = Painter::new(Box::new(io::stdout()), ResultTab::Preview);
    let mut controller = GenerationController::new(api);
    painter.paint(&mut controller)?;

    'form: loop {
        let Some(input) = prompt(&mut lines, "Repository URL (empty to quit): ").await? else {
            break;
        };
        let url = input.trim().to_string();
        if url.is_empty() {
            break;
        }
        if !is_valid_github_url(&url) {
            println!("{INVALID_URL_MESSAGE}");
            continue;
        }

        let mut view = drive(&mut controller, &mut painter, &url).await?;
        loop {
            let choices = match Screen::for_stage(view.stage) {
                Screen::Result => "[c]opy [d]ownload [p]review [m]arkdown [n]ew [q]uit: ",
                _ => "[r]etry [n]ew [q]uit: ",
            };
            let Some(answer) = prompt(&mut lines, choices).await? else {
                break 'form;
            };
            match parse_action(&answer) {
                Some(Action::Copy) if view.stage == GenerationStage::Complete => {
                    copy_readme(&mut io::stdout().lock(), &view.markdown)?;
                }
                Some(Action::Download) if view.stage == GenerationStage::Complete => {
                    match download_readme(out_dir, &view.markdown) {
                        Ok(path) => {
                            painter.notice(&format!("{NOTICE_DOWNLOADED} ({})", path.display()))?
                        }
                        Err(err) => {
                            readme_error!("download failed: {}", err);
                            println!("Download failed: {err}");
                        }
                    }
                }
                Some(Action::Tab(tab)) if view.stage == GenerationStage::Complete => {
                    painter.tab = tab;
                    painter.full(&view)?;
                }
                Some(Action::Retry) if view.stage == GenerationStage::Error => {
                    view = drive(&mut controller, &mut painter, &url).await?;
                }
                Some(Action::New) => {
                    controller.reset();
                    painter.notice(NOTICE_RESET)?;
                    painter.paint(&mut controller)?;
                    continue 'form;
                }
                Some(Action::Quit) => break 'form,
                _ => println!("Unknown choice"),
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn preview_file(api: &dyn ReadmeApi, file: &Path) -> anyhow::Result<ExitCode> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    match api.preview(&content).await {
        Envelope::Success(preview) => {
            let lines = ui::text::html_to_text(preview.html.as_deref().unwrap_or_default());
            if lines.is_empty() {
                println!("{NO_PREVIEW}");
            }
            for line in lines {
                println!("{line}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Envelope::Failure { error } => {
            eprintln!("{}", error.as_deref().unwrap_or(PREVIEW_FAILED_MESSAGE));
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_parse_case_insensitively() {
        assert!(matches!(parse_action("C"), Some(Action::Copy)));
        assert!(matches!(parse_action(" download "), Some(Action::Download)));
        assert!(matches!(
            parse_action("m"),
            Some(Action::Tab(ResultTab::Markdown))
        ));
        assert!(matches!(parse_action(""), Some(Action::New)));
        assert!(matches!(parse_action("Q"), Some(Action::Quit)));
        assert!(parse_action("x").is_none());
    }
}
