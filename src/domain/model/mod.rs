// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

use crate::domain::errors::DomainError;


/// Time specification with precision - represents time in seconds with fractional precision
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct TimeSpec {
    pub seconds: f64,
}

impl TimeSpec {
    /// Create a new TimeSpec from seconds
    pub fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    /// Parse time string in various formats
    pub fn parse(time_str: &str) -> Result<Self, DomainError> {
        let trimmed = time_str.trim();

        // Plain seconds
        if let Ok(seconds) = trimmed.parse::<f64>() {
            if !seconds.is_finite() {
                return Err(DomainError::BadArgs(format!(
                    "Time must be a finite number: {}",
                    trimmed
                )));
            }
            if seconds < 0.0 {
                return Err(DomainError::BadArgs("Time cannot be negative".to_string()));
            }
            return Ok(Self::from_seconds(seconds));
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        match parts.as_slice() {
            [minutes, seconds] => {
                let minutes = parse_component::<u32>(minutes, "minutes")?;
                if minutes >= 60 {
                    return Err(DomainError::BadArgs(
                        "Minutes must be less than 60; use HH:MM:SS for longer times".to_string(),
                    ));
                }
                let seconds = parse_seconds_component(seconds)?;
                Ok(Self::from_seconds(minutes as f64 * 60.0 + seconds))
            }
            [hours, minutes, seconds] => {
                let hours = parse_component::<u32>(hours, "hours")?;
                let minutes = parse_component::<u32>(minutes, "minutes")?;
                if minutes >= 60 {
                    return Err(DomainError::BadArgs(
                        "Minutes must be less than 60".to_string(),
                    ));
                }
                let seconds = parse_seconds_component(seconds)?;
                Ok(Self::from_seconds(
                    hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds,
                ))
            }
            _ => Err(DomainError::BadArgs(format!(
                "Invalid time format '{}'. Supported formats: seconds (e.g., 12.5), MM:SS.ms (e.g., 1:30.5), HH:MM:SS.ms (e.g., 1:02:30.5)",
                trimmed
            ))),
        }
    }

    /// Format as [H:]MM:SS.mmm
    pub fn format_hms(&self) -> String {
        let total_millis = (self.seconds * 1000.0).round() as u64;
        let hours = total_millis / 3_600_000;
        let minutes = (total_millis % 3_600_000) / 60_000;
        let seconds = (total_millis % 60_000) / 1000;
        let milliseconds = total_millis % 1000;

        if hours > 0 {
            format!("{}:{:02}:{:02}.{:03}", hours, minutes, seconds, milliseconds)
        } else {
            format!("{:02}:{:02}.{:03}", minutes, seconds, milliseconds)
        }
    }
}

fn parse_component<T: std::str::FromStr>(part: &str, name: &str) -> Result<T, DomainError> {
    part.trim()
        .parse::<T>()
        .map_err(|_| DomainError::BadArgs(format!("Invalid {} format: '{}'", name, part)))
}

fn parse_seconds_component(part: &str) -> Result<f64, DomainError> {
    let seconds = parse_component::<f64>(part, "seconds")?;
    if !(0.0..60.0).contains(&seconds) {
        return Err(DomainError::BadArgs(
            "Seconds must be between 0 and 60".to_string(),
        ));
    }
    Ok(seconds)
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_hms())
    }
}

/// Seconds removed from the beginning and end of every input file
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrimWindow {
    pub start_cut: TimeSpec,
    pub end_cut: TimeSpec,
}

impl TrimWindow {
    /// Create a new trim window; both cuts must be non-negative
    pub fn new(start_cut: TimeSpec, end_cut: TimeSpec) -> Result<Self, DomainError> {
        for (name, cut) in [("start", start_cut), ("end", end_cut)] {
            if !cut.seconds.is_finite() || cut.seconds < 0.0 {
                return Err(DomainError::BadArgs(format!(
                    "{} cut must be a non-negative number of seconds, got {}",
                    name, cut.seconds
                )));
            }
        }
        Ok(Self { start_cut, end_cut })
    }

    /// Create a trim window from plain seconds
    pub fn from_seconds(start_cut: f64, end_cut: f64) -> Result<Self, DomainError> {
        Self::new(TimeSpec::from_seconds(start_cut), TimeSpec::from_seconds(end_cut))
    }

    /// Total seconds removed from a file
    pub fn total(&self) -> f64 {
        self.start_cut.seconds + self.end_cut.seconds
    }

    /// Length left after trimming, or None when nothing would remain
    pub fn retained(&self, duration: f64) -> Option<f64> {
        if duration <= self.total() {
            None
        } else {
            Some(duration - self.total())
        }
    }
}

impl fmt::Display for TrimWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-{}s / -{}s", self.start_cut.seconds, self.end_cut.seconds)
    }
}

/// Accepted input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    Wav,
    M4a,
}

impl AudioFormat {
    /// Every accepted format, in extension-list order
    pub const ALL: [AudioFormat; 3] = [AudioFormat::Mp3, AudioFormat::Wav, AudioFormat::M4a];

    /// Detect format from a path's extension, case-insensitively
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let extension = path.as_ref().extension()?.to_string_lossy().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.extension() == extension)
    }

    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
            AudioFormat::M4a => "m4a",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Output encoder settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodeSettings {
    pub codec: String,
    pub bitrate_kbps: u32,
    pub channels: u8,
    pub compression_level: u8,
    pub strip_metadata: bool,
    /// libmp3lame VBR quality (0 best, 9 worst); overrides the bitrate when set
    pub vbr_quality: Option<u8>,
}

impl EncodeSettings {
    pub const MIN_BITRATE_KBPS: u32 = 8;
    pub const MAX_BITRATE_KBPS: u32 = 320;

    /// Validate value ranges
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(Self::MIN_BITRATE_KBPS..=Self::MAX_BITRATE_KBPS).contains(&self.bitrate_kbps) {
            return Err(DomainError::Config(format!(
                "Bitrate must be between {} and {} kbps, got {}",
                Self::MIN_BITRATE_KBPS,
                Self::MAX_BITRATE_KBPS,
                self.bitrate_kbps
            )));
        }
        if self.channels == 0 {
            return Err(DomainError::Config("Channel count cannot be zero".to_string()));
        }
        if let Some(quality) = self.vbr_quality {
            if quality > 9 {
                return Err(DomainError::Config(format!(
                    "VBR quality must be between 0 and 9, got {}",
                    quality
                )));
            }
        }
        Ok(())
    }
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            codec: "libmp3lame".to_string(),
            bitrate_kbps: 64,
            channels: 1,
            compression_level: 0,
            strip_metadata: true,
            vbr_quality: None,
        }
    }
}

/// One unit of work submitted to the worker pool
#[derive(Debug, Clone, PartialEq)]
pub struct TrimJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub window: TrimWindow,
    pub format: AudioFormat,
}

impl TrimJob {
    /// File name used in reports
    pub fn file_name(&self) -> String {
        self.input
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.input.to_string_lossy().to_string())
    }
}

/// Per-file result classification
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum JobStatus {
    Processed { input_duration: f64, output_duration: f64 },
    Skipped { duration: f64 },
    Failed { reason: String },
}

/// Result of one job
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobOutcome {
    pub file_name: String,
    #[serde(flatten)]
    pub status: JobStatus,
}

impl JobOutcome {
    pub fn processed(file_name: impl Into<String>, input_duration: f64, output_duration: f64) -> Self {
        Self {
            file_name: file_name.into(),
            status: JobStatus::Processed {
                input_duration,
                output_duration,
            },
        }
    }

    pub fn skipped(file_name: impl Into<String>, duration: f64) -> Self {
        Self {
            file_name: file_name.into(),
            status: JobStatus::Skipped { duration },
        }
    }

    pub fn failed(file_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            status: JobStatus::Failed {
                reason: reason.into(),
            },
        }
    }
}

/// A file that failed, with the captured diagnostic
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedFile {
    pub file_name: String,
    pub reason: String,
}

/// Aggregated counts for a batch
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub failures: Vec<FailedFile>,
    #[serde(with = "duration_secs")]
    pub elapsed: Duration,
}

impl BatchSummary {
    /// Create an empty summary expecting `total` outcomes
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    /// Fold one outcome into the counts
    pub fn record(&mut self, outcome: JobOutcome) {
        match outcome.status {
            JobStatus::Processed { .. } => self.processed += 1,
            JobStatus::Skipped { .. } => self.skipped += 1,
            JobStatus::Failed { reason } => {
                self.failed += 1;
                self.failures.push(FailedFile {
                    file_name: outcome.file_name,
                    reason,
                });
            }
        }
    }

    /// Number of outcomes recorded so far
    pub fn completed(&self) -> usize {
        self.processed + self.skipped + self.failed
    }

    /// Every expected outcome has been recorded
    pub fn is_complete(&self) -> bool {
        self.completed() == self.total
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

mod duration_secs {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }
}
