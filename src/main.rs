use std::path::{Path, PathBuf};

use clap::Parser;
use taskpad::cli::commands::Cli;
use taskpad::cli::handlers;
use taskpad::io::config_io;
use taskpad::io::log::{self, LogTarget};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir()?;
    let config_path = config_io::resolve_config_path(cli.config.as_deref(), &cwd);
    let config = match &config_path {
        Some(path) => config_io::read_config(path)?,
        None => Default::default(),
    };

    let log_file: Option<PathBuf> = cli
        .log_file
        .clone()
        .or_else(|| config.log.file.as_ref().map(PathBuf::from));

    match cli.command {
        None => {
            // The TUI owns the terminal, so logs go to a file or nowhere
            let target = match log_file.as_deref() {
                Some(path) => LogTarget::File(path),
                None => LogTarget::Off,
            };
            log::init(&config.log.level, target)?;
            log_config_source(config_path.as_deref());
            let store = config_io::initial_store(&config, cli.empty)?;
            taskpad::tui::run(store, &config.ui)
        }
        Some(command) => {
            log::init(&config.log.level, LogTarget::Stderr)?;
            log_config_source(config_path.as_deref());
            handlers::dispatch(command, &config, cli.empty)
        }
    }
}

/// Runs once the subscriber is installed, so the event is not dropped
fn log_config_source(path: Option<&Path>) {
    match path {
        Some(path) => tracing::debug!(path = %path.display(), "config loaded"),
        None => tracing::debug!("no config file, using defaults"),
    }
}
