// Domain errors - Error types for the domain layer

use std::fmt;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// File not found
    FileNotFound(String),
    /// Input directory does not exist or is not a directory
    InputDirNotFound(String),
    /// Input directory holds no files with an accepted extension
    NoAudioFiles(String),
    /// ffmpeg / ffprobe could not be located
    ToolNotFound(String),
    /// Duration query failed
    ProbeFailed(String),
    /// Decode pass over the input failed
    IntegrityFailed(String),
    /// Trim / transcode failed
    EncodeFailed(String),
    /// File system operation failed
    FsFail(String),
    /// Invalid configuration
    Config(String),
    /// Internal error
    InternalError(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::FileNotFound(msg) => write!(f, "File not found: {}", msg),
            DomainError::InputDirNotFound(msg) => {
                write!(f, "Input directory does not exist: {}", msg)
            }
            DomainError::NoAudioFiles(msg) => write!(f, "No audio files found in {}", msg),
            DomainError::ToolNotFound(msg) => write!(f, "Media tool not found: {}", msg),
            DomainError::ProbeFailed(msg) => write!(f, "Duration probe failed: {}", msg),
            DomainError::IntegrityFailed(msg) => write!(
                f,
                "Audio file may be corrupt or in an unexpected format: {}",
                msg
            ),
            DomainError::EncodeFailed(msg) => write!(f, "FFmpeg error: {}", msg),
            DomainError::FsFail(msg) => write!(f, "File system error: {}", msg),
            DomainError::Config(msg) => write!(f, "Configuration error: {}", msg),
            DomainError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
