// Domain rules - Business logic and policies

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::domain::errors::*;
use crate::domain::model::*;

#[cfg(test)]
mod tests;

/// Classification of a probed file against the trim window
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrimDecision {
    /// Trim `retained` seconds starting at `start`
    Trim { start: f64, retained: f64 },
    /// Nothing would be left after trimming
    TooShort,
}

/// Business rules for deciding what happens to a file
pub struct TrimPolicy;

impl TrimPolicy {
    /// Decide whether a file of `duration` seconds is trimmed or skipped
    pub fn decide(window: &TrimWindow, duration: f64) -> TrimDecision {
        match window.retained(duration) {
            Some(retained) => TrimDecision::Trim {
                start: window.start_cut.seconds,
                retained,
            },
            None => TrimDecision::TooShort,
        }
    }
}

/// Business rules for turning directory entries into jobs
pub struct JobPlanner;

impl JobPlanner {
    /// Build one job per accepted file, ordered by file name.
    /// Files whose extension is not accepted never produce a job.
    pub fn plan(
        files: &[PathBuf],
        output_dir: &Path,
        window: TrimWindow,
    ) -> Vec<TrimJob> {
        let mut jobs: Vec<TrimJob> = files
            .iter()
            .filter_map(|input| {
                let format = AudioFormat::from_path(input)?;
                let file_name = input.file_name()?;
                Some(TrimJob {
                    input: input.clone(),
                    output: output_dir.join(file_name),
                    window,
                    format,
                })
            })
            .collect();
        jobs.sort_by(|a, b| a.input.file_name().cmp(&b.input.file_name()));
        jobs
    }

    /// Worker count: explicit override when positive, otherwise the CPU count
    pub fn worker_count(requested: Option<usize>, available: usize) -> usize {
        match requested {
            Some(n) if n > 0 => n,
            _ => available.max(1),
        }
    }
}

/// One way of asking ffmpeg to read an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStrategy {
    /// Force a named demuxer (`-f <name>` before `-i`)
    Demuxer(&'static str),
    /// Let ffmpeg probe the container itself
    AutoDetect,
}

impl DecodeStrategy {
    /// Ordered attempts for a file: its own format, mp3, auto-detection, wav.
    /// Duplicates are dropped and the first occurrence keeps its place.
    pub fn ordered_for(format: AudioFormat) -> Vec<DecodeStrategy> {
        let candidates = [
            DecodeStrategy::Demuxer(format.extension()),
            DecodeStrategy::Demuxer(AudioFormat::Mp3.extension()),
            DecodeStrategy::AutoDetect,
            DecodeStrategy::Demuxer(AudioFormat::Wav.extension()),
        ];

        let mut strategies = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if !strategies.contains(&candidate) {
                strategies.push(candidate);
            }
        }
        strategies
    }

    /// Label for logs
    pub fn label(&self) -> String {
        match self {
            DecodeStrategy::Demuxer(name) => format!("demuxer={}", name),
            DecodeStrategy::AutoDetect => "auto-detect".to_string(),
        }
    }
}

/// Builds ffmpeg command lines for the trim/encode step
pub struct EncoderArgs;

impl EncoderArgs {
    /// Arguments for one trim/encode attempt
    pub fn trim(
        input: &Path,
        output: &Path,
        start: f64,
        retained: f64,
        settings: &EncodeSettings,
        strategy: DecodeStrategy,
    ) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-y".into(), "-v".into(), "error".into()];

        if let DecodeStrategy::Demuxer(name) = strategy {
            args.push("-f".into());
            args.push(name.into());
        }

        args.push("-i".into());
        args.push(input.as_os_str().to_os_string());
        args.push("-ss".into());
        args.push(format_seconds(start).into());
        args.push("-t".into());
        args.push(format_seconds(retained).into());
        args.push("-acodec".into());
        args.push(settings.codec.clone().into());
        args.push("-b:a".into());
        args.push(format!("{}k", settings.bitrate_kbps).into());
        args.push("-ac".into());
        args.push(settings.channels.to_string().into());
        args.push("-compression_level".into());
        args.push(settings.compression_level.to_string().into());

        if settings.strip_metadata {
            args.push("-map_metadata".into());
            args.push("-1".into());
        }
        if let Some(quality) = settings.vbr_quality {
            args.push("-q:a".into());
            args.push(quality.to_string().into());
        }

        // Output is MP3 regardless of the file's extension
        args.push("-f".into());
        args.push("mp3".into());
        args.push(output.as_os_str().to_os_string());
        args
    }

    /// Arguments for a full decode pass that discards the result
    pub fn integrity_check(input: &Path) -> Vec<OsString> {
        vec![
            "-v".into(),
            "error".into(),
            "-i".into(),
            input.as_os_str().to_os_string(),
            "-f".into(),
            "null".into(),
            "-".into(),
        ]
    }

    /// Arguments for an ffprobe duration query
    pub fn probe_duration(input: &Path) -> Vec<OsString> {
        vec![
            "-v".into(),
            "error".into(),
            "-show_entries".into(),
            "format=duration".into(),
            "-of".into(),
            "default=noprint_wrappers=1:nokey=1".into(),
            input.as_os_str().to_os_string(),
        ]
    }
}

/// Millisecond-precision seconds for ffmpeg time options
pub fn format_seconds(seconds: f64) -> String {
    format!("{:.3}", seconds)
}

/// Parse ffprobe's bare `format=duration` output
pub fn parse_probe_duration(stdout: &str) -> Result<f64, DomainError> {
    let value = stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or_else(|| DomainError::ProbeFailed("ffprobe returned no duration".to_string()))?;

    let duration = value.parse::<f64>().map_err(|_| {
        DomainError::ProbeFailed(format!("unexpected ffprobe duration output: '{}'", value))
    })?;

    if !duration.is_finite() || duration < 0.0 {
        return Err(DomainError::ProbeFailed(format!(
            "invalid duration reported: {}",
            value
        )));
    }
    Ok(duration)
}
