use std::process::ExitCode;

mod platform;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    platform::run_app().await
}
