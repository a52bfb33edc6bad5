//! audiotrim - batch audio trimmer
//!
//! Cuts a fixed amount of time from the start and end of every `.mp3`,
//! `.wav` and `.m4a` file in a directory and re-encodes the remainder as
//! mono 64 kbit/s MP3, processing files on a pool of concurrent workers.
//!
//! # Usage
//!
//! ```bash
//! audiotrim trim --input recordings/ --output trimmed/ --start 10 --end 10
//! audiotrim inspect --input recordings/interview.m4a --start 0:30
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use audiotrim::adapters::TomlConfigAdapter;
use audiotrim::cli::{commands, Cli, Commands};
use audiotrim::ports::ConfigPort;
use audiotrim::utils::logging::{LoggingConfig, LoggingSystem};

/// Main entry point for the audiotrim CLI application
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The file may set the log level, so it is read before logging starts
    let config_source = TomlConfigAdapter::new(cli.config.clone());
    let config = config_source
        .load()
        .context("Failed to load configuration")?;

    let level = cli
        .log_level
        .clone()
        .or_else(|| config.log_level.clone())
        .unwrap_or_else(|| LoggingConfig::default().level);
    LoggingSystem::new(LoggingConfig {
        level,
        format: cli.log_format,
    })
    .initialize()?;

    info!("Starting audiotrim {}", env!("CARGO_PKG_VERSION"));
    match config_source.source_path() {
        Some(path) => info!("Loaded configuration from {}", path.display()),
        None => debug!("No config file found, using defaults"),
    }

    match cli.command {
        Commands::Trim(args) => commands::trim(args, &config).await,
        Commands::Inspect(args) => commands::inspect(args, &config).await,
    }
}
