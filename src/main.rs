use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

mod agent;
mod cli;
mod commands;
mod config;
mod install;
mod presenter;
mod responder;

use cli::{Cli, Commands};
use config::{Config, LogLevel};

fn setup_logging(log_level: &LogLevel) -> Result<PathBuf> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("agentpublish")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("agentpublish.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // RUST_LOG env var takes precedence, otherwise use config log_level
    let mut builder = env_logger::Builder::new();

    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(log_level.as_filter());
    }

    builder.target(env_logger::Target::Pipe(target)).init();

    Ok(log_file)
}

/// Log warnings to stderr when the log file is unavailable
fn setup_fallback_logging() {
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .try_init();
}

fn run(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::List => commands::list::run(config),
        Commands::Init => commands::init::run(config),
        Commands::Select { folders } => commands::select::run(folders, config),
        Commands::Chat => commands::chat::run(config),
        Commands::Ask => commands::ask::run(config),
        Commands::Completions { shell } => commands::completions::run(shell),
    }
}

fn main() -> Result<()> {
    // Help and version are printed during parsing
    let Some(cli) = Cli::parse_lenient() else {
        return Ok(());
    };

    let (config, config_problems) = Config::load();

    match setup_logging(&config.log_level) {
        Ok(log_file) => info!("Logging initialized, writing to: {}", log_file.display()),
        Err(e) => {
            setup_fallback_logging();
            log::warn!("Falling back to stderr logging: {:#}", e);
        }
    }

    for problem in &config_problems {
        log::warn!("{}", problem);
        eprintln!("{} {} (file ignored)", "⚠".yellow(), problem);
    }

    if let Some(reason) = cli.fallback_reason() {
        info!("Unrecognised arguments, falling back to list: {}", reason);
    }

    // Failures degrade to partial output; the tool always exits cleanly
    if let Err(e) = run(cli.into_command(), &config) {
        log::error!("Command failed: {:?}", e);
        eprintln!("{} {:#}", "✗".red(), e);
    }

    Ok(())
}
