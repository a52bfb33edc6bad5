//! FFmpeg execution adapter
//!
//! Trims and re-encodes one file. Inputs are read with an ordered list of
//! decode strategies; the first that succeeds wins and the last error is
//! reported when none do.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::adapters::process::run_tool;
use crate::adapters::tool_locator::MediaToolPaths;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::{DecodeStrategy, EncoderArgs};
use crate::ports::*;

/// FFmpeg-based execution adapter
pub struct FFmpegAdapter {
    ffmpeg: PathBuf,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter
    pub fn new(tools: &MediaToolPaths) -> Self {
        Self {
            ffmpeg: tools.ffmpeg.clone(),
        }
    }

    async fn attempt(
        &self,
        job: &TrimJob,
        start: f64,
        retained: f64,
        settings: &EncodeSettings,
        strategy: DecodeStrategy,
    ) -> Result<(), DomainError> {
        let args = EncoderArgs::trim(&job.input, &job.output, start, retained, settings, strategy);
        let output = run_tool(&self.ffmpeg, args)
            .await
            .map_err(DomainError::EncodeFailed)?;

        if output.success {
            Ok(())
        } else {
            Err(DomainError::EncodeFailed(output.diagnostic()))
        }
    }
}

#[async_trait]
impl ExecutePort for FFmpegAdapter {
    async fn trim_encode(
        &self,
        job: &TrimJob,
        start: f64,
        retained: f64,
        settings: &EncodeSettings,
    ) -> Result<(), DomainError> {
        if writes_over_input(job).await {
            return Err(DomainError::EncodeFailed(format!(
                "output {} is the input file",
                job.output.display()
            )));
        }

        let strategies = DecodeStrategy::ordered_for(job.format);
        let mut last_error = None;

        for strategy in strategies {
            match self.attempt(job, start, retained, settings, strategy).await {
                Ok(()) => {
                    debug!(file = %job.file_name(), strategy = %strategy.label(), "Encoded");
                    return Ok(());
                }
                Err(e) => {
                    debug!(
                        file = %job.file_name(),
                        strategy = %strategy.label(),
                        error = %e,
                        "Decode strategy failed"
                    );
                    remove_partial_output(job).await;
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            DomainError::InternalError("no decode strategies available".to_string())
        }))
    }
}

/// Whether the output path names the input file, however it is spelled
async fn writes_over_input(job: &TrimJob) -> bool {
    if job.output == job.input {
        return true;
    }
    match (
        tokio::fs::canonicalize(&job.input).await,
        tokio::fs::canonicalize(&job.output).await,
    ) {
        (Ok(input), Ok(output)) => input == output,
        _ => false,
    }
}

async fn remove_partial_output(job: &TrimJob) {
    // Never delete the source
    if writes_over_input(job).await {
        return;
    }
    let path = &job.output;
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!("Removed partial output {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Could not remove partial output {}: {}", path.display(), e),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use tempfile::TempDir;

    /// Shell stand-in for ffmpeg: fails unless the input is forced to `wav`,
    /// and records each attempt's demuxer flag.
    fn fake_ffmpeg(dir: &Path) -> PathBuf {
        let script = dir.join("ffmpeg");
        let log = dir.join("attempts.log");
        fs::write(
            &script,
            format!(
                "#!/bin/sh\n\
                 out=\"\"; fmt=auto; prev=\"\"; seen_input=0\n\
                 for a in \"$@\"; do\n\
                   if [ \"$prev\" = \"-f\" ] && [ $seen_input -eq 0 ]; then fmt=$a; fi\n\
                   if [ \"$a\" = \"-i\" ]; then seen_input=1; fi\n\
                   prev=$a; out=$a\n\
                 done\n\
                 echo $fmt >> {log}\n\
                 echo partial > \"$out\"\n\
                 if [ \"$fmt\" = \"wav\" ]; then exit 0; fi\n\
                 echo \"decode failed with $fmt\" >&2\n\
                 exit 1\n",
                log = log.display()
            ),
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        script
    }

    fn job(dir: &Path, name: &str, format: AudioFormat) -> TrimJob {
        TrimJob {
            input: dir.join(name),
            output: dir.join("out").join(name),
            window: TrimWindow::from_seconds(1.0, 1.0).unwrap(),
            format,
        }
    }

    #[tokio::test]
    async fn test_strategies_tried_in_order_until_success() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("out")).unwrap();
        let ffmpeg = fake_ffmpeg(dir.path());
        let adapter = FFmpegAdapter { ffmpeg };

        let job = job(dir.path(), "a.mp3", AudioFormat::Mp3);
        adapter
            .trim_encode(&job, 1.0, 3.0, &EncodeSettings::default())
            .await
            .unwrap();

        let attempts = fs::read_to_string(dir.path().join("attempts.log")).unwrap();
        assert_eq!(attempts.lines().collect::<Vec<_>>(), vec!["mp3", "auto", "wav"]);
        assert!(job.output.exists());
    }

    #[tokio::test]
    async fn test_last_error_surfaces_and_partial_output_removed() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("out")).unwrap();
        let failing = dir.path().join("ffmpeg-fail");
        fs::write(
            &failing,
            "#!/bin/sh\nfor a in \"$@\"; do out=$a; done\necho partial > \"$out\"\necho \"attempt failed\" >&2\nexit 1\n",
        )
        .unwrap();
        fs::set_permissions(&failing, fs::Permissions::from_mode(0o755)).unwrap();
        let adapter = FFmpegAdapter { ffmpeg: failing };

        let job = job(dir.path(), "c.m4a", AudioFormat::M4a);
        let err = adapter
            .trim_encode(&job, 1.0, 3.0, &EncodeSettings::default())
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::EncodeFailed("attempt failed".to_string()));
        assert!(!job.output.exists());
    }

    #[tokio::test]
    async fn test_output_naming_the_input_leaves_source_untouched() {
        let dir = TempDir::new().unwrap();
        let refusing = dir.path().join("ffmpeg-same");
        fs::write(
            &refusing,
            "#!/bin/sh\necho called >> \"$(dirname \"$0\")/calls.log\"\necho \"Output same as Input #0 - exiting\" >&2\nexit 1\n",
        )
        .unwrap();
        fs::set_permissions(&refusing, fs::Permissions::from_mode(0o755)).unwrap();
        let adapter = FFmpegAdapter { ffmpeg: refusing };

        let song = dir.path().join("song.mp3");
        fs::write(&song, b"original audio").unwrap();
        let spellings = [song.clone(), dir.path().join(".").join("song.mp3")];

        for output in spellings {
            let job = TrimJob {
                input: song.clone(),
                output,
                window: TrimWindow::from_seconds(1.0, 1.0).unwrap(),
                format: AudioFormat::Mp3,
            };
            let err = adapter
                .trim_encode(&job, 1.0, 3.0, &EncodeSettings::default())
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::EncodeFailed(_)));
            assert_eq!(fs::read(&song).unwrap(), b"original audio");
        }
        assert!(!dir.path().join("calls.log").exists());
    }
}
