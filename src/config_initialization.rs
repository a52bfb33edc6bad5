//! Configuration initialization and hierarchy management
//!
//! Precedence: CLI > Env > File > Defaults. Environment variables are folded
//! into the CLI layer by clap's `env` attributes, so only two layers meet here.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::errors::DomainError;
use crate::domain::model::{EncodeSettings, TimeSpec, TrimWindow};
use crate::domain::rules::JobPlanner;
use crate::error::{TrimError, TrimResult};

/// Seconds cut from the start when nothing else says otherwise
pub const DEFAULT_START_CUT: f64 = 10.0;
/// Seconds cut from the end when nothing else says otherwise
pub const DEFAULT_END_CUT: f64 = 10.0;
/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "audiotrim.toml";

/// Values read from the `[audiotrim]` table of a config file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub start_cut: Option<f64>,
    pub end_cut: Option<f64>,
    pub workers: Option<usize>,
    pub bitrate_kbps: Option<u32>,
    pub vbr_quality: Option<u8>,
    pub ffmpeg_path: Option<PathBuf>,
    pub ffprobe_path: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Values given on the command line (or through their environment variables)
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub start: Option<String>,
    pub end: Option<String>,
    pub workers: Option<usize>,
    pub bitrate_kbps: Option<u32>,
    pub ffmpeg_path: Option<PathBuf>,
    pub ffprobe_path: Option<PathBuf>,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub window: TrimWindow,
    pub workers: usize,
    pub encode: EncodeSettings,
    pub ffmpeg_path: Option<PathBuf>,
    pub ffprobe_path: Option<PathBuf>,
}

/// Merge CLI overrides over file values over defaults
pub fn resolve_settings(cli: &CliOverrides, file: &AppConfig) -> TrimResult<RunSettings> {
    let start_cut = resolve_time("start", cli.start.as_deref(), file.start_cut, DEFAULT_START_CUT)?;
    let end_cut = resolve_time("end", cli.end.as_deref(), file.end_cut, DEFAULT_END_CUT)?;
    let window = TrimWindow::new(start_cut, end_cut)?;

    let workers = JobPlanner::worker_count(cli.workers.or(file.workers), num_cpus::get());

    let mut encode = EncodeSettings::default();
    if let Some(bitrate) = cli.bitrate_kbps.or(file.bitrate_kbps) {
        encode.bitrate_kbps = bitrate;
    }
    encode.vbr_quality = file.vbr_quality;
    encode.validate()?;

    let settings = RunSettings {
        window,
        workers,
        encode,
        ffmpeg_path: cli.ffmpeg_path.clone().or_else(|| file.ffmpeg_path.clone()),
        ffprobe_path: cli.ffprobe_path.clone().or_else(|| file.ffprobe_path.clone()),
    };

    info!(
        start_cut = settings.window.start_cut.seconds,
        end_cut = settings.window.end_cut.seconds,
        workers = settings.workers,
        bitrate_kbps = settings.encode.bitrate_kbps,
        "Configuration resolved"
    );
    Ok(settings)
}

fn resolve_time(
    field: &'static str,
    cli_value: Option<&str>,
    file_value: Option<f64>,
    default: f64,
) -> TrimResult<TimeSpec> {
    if let Some(value) = cli_value {
        debug!("CLI override: {}_cut = {}", field, value);
        return TimeSpec::parse(value).map_err(|e| TrimError::InvalidTime {
            field,
            value: value.to_string(),
            message: match e {
                DomainError::BadArgs(msg) => msg,
                other => other.to_string(),
            },
        });
    }
    if let Some(seconds) = file_value {
        debug!("Config file value: {}_cut = {}", field, seconds);
        return Ok(TimeSpec::from_seconds(seconds));
    }
    Ok(TimeSpec::from_seconds(default))
}
