//! FFprobe adapter for media file probing
//!
//! Duration comes from ffprobe; the integrity check is a full ffmpeg decode
//! into the null muxer.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::adapters::process::run_tool;
use crate::adapters::tool_locator::MediaToolPaths;
use crate::domain::errors::*;
use crate::domain::rules::{parse_probe_duration, EncoderArgs};
use crate::ports::*;

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    ffprobe: PathBuf,
    ffmpeg: PathBuf,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter
    pub fn new(tools: &MediaToolPaths) -> Self {
        Self {
            ffprobe: tools.ffprobe.clone(),
            ffmpeg: tools.ffmpeg.clone(),
        }
    }
}

#[async_trait]
impl ProbePort for FFprobeAdapter {
    async fn probe_duration(&self, file_path: &Path) -> Result<f64, DomainError> {
        let output = run_tool(&self.ffprobe, EncoderArgs::probe_duration(file_path))
            .await
            .map_err(DomainError::ProbeFailed)?;

        if !output.success {
            return Err(DomainError::ProbeFailed(output.diagnostic()));
        }

        let duration = parse_probe_duration(&output.stdout)?;
        debug!(file = %file_path.display(), duration, "Probed duration");
        Ok(duration)
    }

    async fn check_integrity(&self, file_path: &Path) -> Result<(), DomainError> {
        let output = run_tool(&self.ffmpeg, EncoderArgs::integrity_check(file_path))
            .await
            .map_err(DomainError::IntegrityFailed)?;

        if output.success {
            Ok(())
        } else {
            Err(DomainError::IntegrityFailed(output.diagnostic()))
        }
    }
}
