//! CLI module for audiotrim
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::utils::logging::LogFormat;

pub mod args;
pub mod commands;

/// Batch audio trimmer
///
/// Cuts a fixed number of seconds from the start and end of every audio
/// file in a directory and re-encodes the rest as mono MP3.
#[derive(Parser, Debug)]
#[command(name = "audiotrim")]
#[command(about = "Trim the start and end off every audio file in a directory")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level or filter directive (RUST_LOG takes precedence)
    #[arg(long, global = true, env = "AUDIOTRIM_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,

    /// Configuration file (default: ./audiotrim.toml when present)
    #[arg(long, global = true, env = "AUDIOTRIM_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Trim every audio file in a directory
    Trim(args::TrimArgs),
    /// Show how a single file would be handled
    Inspect(args::InspectArgs),
}
