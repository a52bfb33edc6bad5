//! audiotrim library
//!
//! Batch trimming of audio files through ffmpeg and ffprobe, organised as a
//! domain core behind ports with process-spawning adapters.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod output;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use adapters::{MediaToolPaths, ToolLocator};
pub use app::{BatchInteractor, BatchRequest, InspectInteractor, InspectRequest, TrimInteractor};
pub use domain::errors::DomainError;
pub use domain::model::{AudioFormat, BatchSummary, JobOutcome, JobStatus, TimeSpec, TrimJob, TrimWindow};
pub use error::{TrimError, TrimResult};
