//! Human-readable and JSON rendering of batch and inspect results

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::adapters::MediaToolPaths;
use crate::app::{InspectReport, PlannedAction};
use crate::domain::model::{BatchSummary, TimeSpec, TrimWindow};
use crate::error::{TrimError, TrimResult};
use crate::utils::Utils;

/// Failed files with their diagnostics, then the final counts line
pub fn render_summary(summary: &BatchSummary) -> String {
    let mut out = String::new();

    if !summary.failures.is_empty() {
        out.push_str("Failed files:\n");
        for failure in &summary.failures {
            let _ = writeln!(out, "- {}: {}", failure.file_name, failure.reason);
        }
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "Finished {} files in {}",
        summary.total,
        Utils::format_duration(summary.elapsed)
    );
    let _ = writeln!(
        out,
        "Done! processed: {}, skipped: {}, failed: {}",
        summary.processed, summary.skipped, summary.failed
    );
    out
}

/// JSON document printed by `trim --json`
#[derive(Debug, Serialize)]
pub struct BatchReport<'a> {
    pub finished_at: DateTime<Utc>,
    pub tools: &'a MediaToolPaths,
    pub window: TrimWindow,
    pub workers: usize,
    #[serde(flatten)]
    pub summary: &'a BatchSummary,
}

impl<'a> BatchReport<'a> {
    pub fn new(
        summary: &'a BatchSummary,
        tools: &'a MediaToolPaths,
        window: TrimWindow,
        workers: usize,
    ) -> Self {
        Self {
            finished_at: Utc::now(),
            tools,
            window,
            workers,
            summary,
        }
    }
}

/// Single-file inspection report
pub fn render_inspect(report: &InspectReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "File: {}", report.file.display());
    let _ = writeln!(
        out,
        "Format: {}",
        report
            .format
            .map(|f| f.to_string())
            .unwrap_or_else(|| "unsupported".to_string())
    );
    let _ = writeln!(
        out,
        "Duration: {} ({:.3}s)",
        TimeSpec::from_seconds(report.duration),
        report.duration
    );
    let _ = writeln!(out, "Trim window: {}", report.window);

    match &report.integrity_error {
        None => out.push_str("Integrity: ok\n"),
        Some(error) => {
            let _ = writeln!(out, "Integrity: FAILED - {}", error);
        }
    }

    let action = match &report.action {
        PlannedAction::Trim {
            start,
            output_duration,
        } => format!(
            "trim from {:.3}s, output {} ({:.3}s)",
            start,
            TimeSpec::from_seconds(*output_duration),
            output_duration
        ),
        PlannedAction::Skip => "skip (too short)".to_string(),
        PlannedAction::Ignore => "ignore (extension not accepted)".to_string(),
    };
    let _ = writeln!(out, "Action: {}", action);
    out
}

/// Pretty JSON for any report
pub fn render_json<T: Serialize>(value: &T) -> TrimResult<String> {
    serde_json::to_string_pretty(value).map_err(TrimError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{AudioFormat, JobOutcome};
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn test_render_summary_lists_failures() {
        let mut summary = BatchSummary::new(3);
        summary.record(JobOutcome::processed("a.mp3", 60.0, 40.0));
        summary.record(JobOutcome::skipped("b.wav", 5.0));
        summary.record(JobOutcome::failed("c.m4a", "FFmpeg error: moov atom not found"));
        summary.elapsed = Duration::from_secs(2);

        let text = render_summary(&summary);
        assert!(text.starts_with("Failed files:\n- c.m4a: FFmpeg error: moov atom not found"));
        assert_eq!(
            text.lines().last(),
            Some("Done! processed: 1, skipped: 1, failed: 1")
        );
    }

    #[test]
    fn test_render_summary_without_failures() {
        let mut summary = BatchSummary::new(1);
        summary.record(JobOutcome::processed("a.mp3", 60.0, 40.0));
        assert!(!render_summary(&summary).contains("Failed files"));
    }

    #[test]
    fn test_batch_report_flattens_summary() {
        let mut summary = BatchSummary::new(1);
        summary.record(JobOutcome::skipped("b.wav", 5.0));
        let tools = MediaToolPaths {
            ffmpeg: PathBuf::from("/usr/bin/ffmpeg"),
            ffprobe: PathBuf::from("/usr/bin/ffprobe"),
        };
        let window = TrimWindow::from_seconds(10.0, 10.0).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&render_json(&BatchReport::new(&summary, &tools, window, 4)).unwrap())
                .unwrap();
        assert_eq!(value["skipped"], 1);
        assert_eq!(value["workers"], 4);
        assert_eq!(value["tools"]["ffmpeg"], "/usr/bin/ffmpeg");
        assert!(value["finished_at"].is_string());
    }

    #[test]
    fn test_render_inspect() {
        let report = InspectReport {
            file: PathBuf::from("a.mp3"),
            format: Some(AudioFormat::Mp3),
            duration: 60.0,
            integrity_ok: true,
            integrity_error: None,
            window: TrimWindow::from_seconds(10.0, 10.0).unwrap(),
            action: PlannedAction::Trim {
                start: 10.0,
                output_duration: 40.0,
            },
        };
        let text = render_inspect(&report);
        assert!(text.contains("Format: mp3"));
        assert!(text.contains("Integrity: ok"));
        assert!(text.contains("Action: trim from 10.000s, output 00:40.000"));

        let json = render_json(&report).unwrap();
        assert!(json.contains("\"action\": \"trim\""));
    }
}
