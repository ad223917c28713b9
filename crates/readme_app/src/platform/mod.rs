mod app;
mod cli;
mod export;
mod logging;
mod ui;

pub use app::run_app;
