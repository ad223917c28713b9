use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use readme_engine::{ClientSettings, DEFAULT_BASE_URL};

use super::logging::LogDestination;
use super::ui::render::ResultTab;

#[derive(Parser, Debug)]
#[command(name = "readme-generator", version, about = "Generate a README for a GitHub repository")]
pub struct Cli {
    /// Base address of the generation backend.
    #[arg(long, global = true, env = "README_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub api_base: String,
    /// Per-request timeout in seconds.
    #[arg(long, global = true, default_value_t = 120)]
    pub timeout_secs: u64,
    #[arg(long, global = true, env = "README_LOG", value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,
    #[arg(long, global = true, default_value = "readme_app.log")]
    pub log_file: PathBuf,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one generation attempt and exit.
    Generate {
        url: String,
        /// Directory to download README.md into.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print only the raw markdown on stdout.
        #[arg(long)]
        copy: bool,
        #[arg(long, value_enum, default_value_t = ResultTab::Preview)]
        tab: ResultTab,
    },
    /// Prompt for repository URLs until an empty line (the default).
    Interactive {
        /// Directory used by the download action.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Render a local markdown file through the backend.
    Preview { file: PathBuf },
    /// Ask the backend whether it is up.
    Health,
    /// List example repository URLs.
    Examples,
}

impl Cli {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.api_base.clone(),
            request_timeout: Duration::from_secs(self.timeout_secs.max(1)),
            ..ClientSettings::default()
        }
    }
}
