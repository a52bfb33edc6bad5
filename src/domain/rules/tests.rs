// Unit tests for business rules

use super::*;
use std::ffi::OsString;
use std::path::PathBuf;

fn window(start: f64, end: f64) -> TrimWindow {
    TrimWindow::from_seconds(start, end).unwrap()
}

fn as_strings(args: &[OsString]) -> Vec<String> {
    args.iter().map(|a| a.to_string_lossy().to_string()).collect()
}

#[test]
fn test_trim_policy_trims_long_files() {
    let decision = TrimPolicy::decide(&window(10.0, 10.0), 60.0);
    assert_eq!(
        decision,
        TrimDecision::Trim {
            start: 10.0,
            retained: 40.0
        }
    );
}

#[test]
fn test_trim_policy_skips_short_files() {
    assert_eq!(TrimPolicy::decide(&window(10.0, 10.0), 5.0), TrimDecision::TooShort);
}

#[test]
fn test_trim_policy_boundary_is_skipped() {
    // Exactly start + end leaves nothing
    assert_eq!(TrimPolicy::decide(&window(22.0, 17.0), 39.0), TrimDecision::TooShort);
    assert!(matches!(
        TrimPolicy::decide(&window(22.0, 17.0), 39.001),
        TrimDecision::Trim { .. }
    ));
}

#[test]
fn test_job_planner_filters_extensions() {
    let files = vec![
        PathBuf::from("/in/b.wav"),
        PathBuf::from("/in/notes.txt"),
        PathBuf::from("/in/a.mp3"),
        PathBuf::from("/in/C.M4A"),
        PathBuf::from("/in/cover.jpg"),
        PathBuf::from("/in/mp3"),
    ];
    let jobs = JobPlanner::plan(&files, Path::new("/out"), window(1.0, 2.0));

    let names: Vec<String> = jobs.iter().map(|j| j.file_name()).collect();
    assert_eq!(names, vec!["C.M4A", "a.mp3", "b.wav"]);
    assert_eq!(jobs[1].output, PathBuf::from("/out/a.mp3"));
    assert_eq!(jobs[2].output, PathBuf::from("/out/b.wav"));
    assert_eq!(jobs[0].format, AudioFormat::M4a);
    assert!(jobs.iter().all(|j| j.window == window(1.0, 2.0)));
}

#[test]
fn test_job_planner_empty() {
    let files = vec![PathBuf::from("/in/readme.md")];
    assert!(JobPlanner::plan(&files, Path::new("/out"), window(0.0, 0.0)).is_empty());
}

#[test]
fn test_worker_count() {
    assert_eq!(JobPlanner::worker_count(Some(8), 4), 8);
    assert_eq!(JobPlanner::worker_count(None, 4), 4);
    assert_eq!(JobPlanner::worker_count(Some(0), 4), 4);
    assert_eq!(JobPlanner::worker_count(None, 0), 1);
}

#[test]
fn test_decode_strategies_ordered_and_deduplicated() {
    assert_eq!(
        DecodeStrategy::ordered_for(AudioFormat::Mp3),
        vec![
            DecodeStrategy::Demuxer("mp3"),
            DecodeStrategy::AutoDetect,
            DecodeStrategy::Demuxer("wav"),
        ]
    );
    assert_eq!(
        DecodeStrategy::ordered_for(AudioFormat::Wav),
        vec![
            DecodeStrategy::Demuxer("wav"),
            DecodeStrategy::Demuxer("mp3"),
            DecodeStrategy::AutoDetect,
        ]
    );
    assert_eq!(DecodeStrategy::ordered_for(AudioFormat::M4a).len(), 4);
}

#[test]
fn test_encoder_args_trim() {
    let args = EncoderArgs::trim(
        Path::new("in/a.mp3"),
        Path::new("out/a.mp3"),
        10.0,
        40.0,
        &EncodeSettings::default(),
        DecodeStrategy::Demuxer("mp3"),
    );
    assert_eq!(
        as_strings(&args),
        vec![
            "-y", "-v", "error", "-f", "mp3", "-i", "in/a.mp3", "-ss", "10.000", "-t",
            "40.000", "-acodec", "libmp3lame", "-b:a", "64k", "-ac", "1",
            "-compression_level", "0", "-map_metadata", "-1", "-f", "mp3", "out/a.mp3",
        ]
    );
}

#[test]
fn test_encoder_args_auto_detect_and_vbr() {
    let settings = EncodeSettings {
        vbr_quality: Some(8),
        ..EncodeSettings::default()
    };
    let args = as_strings(&EncoderArgs::trim(
        Path::new("b.wav"),
        Path::new("o/b.wav"),
        0.5,
        1.25,
        &settings,
        DecodeStrategy::AutoDetect,
    ));
    assert_eq!(&args[..5], &["-y", "-v", "error", "-i", "b.wav"]);
    let q = args.iter().position(|a| a == "-q:a").unwrap();
    assert_eq!(args[q + 1], "8");
    assert_eq!(args[args.len() - 3..], ["-f", "mp3", "o/b.wav"]);
}

#[test]
fn test_parse_probe_duration() {
    assert_eq!(parse_probe_duration("60.024000\n").unwrap(), 60.024);
    assert_eq!(parse_probe_duration("\n  5.5  \n").unwrap(), 5.5);
    assert!(matches!(
        parse_probe_duration("N/A\n"),
        Err(DomainError::ProbeFailed(_))
    ));
    assert!(parse_probe_duration("").is_err());
    assert!(parse_probe_duration("-3").is_err());
}
