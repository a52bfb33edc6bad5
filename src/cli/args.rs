//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

use crate::config_initialization::CliOverrides;

/// Trim window and media tool options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Time cut from the start (seconds, MM:SS or HH:MM:SS) [default: 10]
    #[arg(short, long, env = "AUDIOTRIM_START")]
    pub start: Option<String>,

    /// Time cut from the end (seconds, MM:SS or HH:MM:SS) [default: 10]
    #[arg(short, long, env = "AUDIOTRIM_END")]
    pub end: Option<String>,

    /// Path to the ffmpeg binary
    #[arg(long, env = "AUDIOTRIM_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    /// Path to the ffprobe binary
    #[arg(long, env = "AUDIOTRIM_FFPROBE")]
    pub ffprobe: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the trim command
#[derive(Args, Debug, Clone)]
pub struct TrimArgs {
    /// Directory holding the source audio files
    #[arg(short, long)]
    pub input: PathBuf,

    /// Directory the trimmed files are written to (created if absent)
    #[arg(short, long)]
    pub output: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Number of files processed concurrently (0 = CPU count)
    #[arg(short, long, env = "AUDIOTRIM_WORKERS")]
    pub workers: Option<usize>,

    /// Output bitrate in kbit/s
    #[arg(short, long, env = "AUDIOTRIM_BITRATE")]
    pub bitrate: Option<u32>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Exit with a non-zero status if any file failed
    #[arg(long)]
    pub fail_on_error: bool,
}

/// Arguments for the inspect command
#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Audio file to inspect
    #[arg(short, long)]
    pub input: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl TrimArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            workers: self.workers,
            bitrate_kbps: self.bitrate,
            ..self.common.overrides()
        }
    }
}

impl InspectArgs {
    pub fn overrides(&self) -> CliOverrides {
        self.common.overrides()
    }
}

impl CommonArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            start: self.start.clone(),
            end: self.end.clone(),
            ffmpeg_path: self.ffmpeg.clone(),
            ffprobe_path: self.ffprobe.clone(),
            ..CliOverrides::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_trim_args_map_to_overrides() {
        let cli = Cli::try_parse_from([
            "audiotrim", "trim", "--input", "in", "--output", "out", "--start", "0:05",
            "--workers", "3", "--bitrate", "96", "--ffmpeg", "/opt/ffmpeg",
        ])
        .unwrap();

        let Commands::Trim(args) = cli.command else {
            panic!("expected trim command");
        };
        let overrides = args.overrides();
        assert_eq!(overrides.start.as_deref(), Some("0:05"));
        assert_eq!(overrides.workers, Some(3));
        assert_eq!(overrides.bitrate_kbps, Some(96));
        assert_eq!(overrides.ffmpeg_path, Some(PathBuf::from("/opt/ffmpeg")));
    }

    #[test]
    fn test_inspect_requires_input() {
        assert!(Cli::try_parse_from(["audiotrim", "inspect"]).is_err());
    }
}
