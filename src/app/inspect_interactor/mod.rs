// Inspect interactor - Reports how a single file would be handled by a batch run

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;

/// Interactor for single-file inspection
pub struct InspectInteractor {
    probe_port: Arc<dyn ProbePort>,
    fs_port: Arc<dyn FsPort>,
}

/// Request for media file inspection
#[derive(Debug, Clone)]
pub struct InspectRequest {
    pub input: PathBuf,
    pub window: TrimWindow,
}

/// What a batch run would do with the file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum PlannedAction {
    Trim { start: f64, output_duration: f64 },
    Skip,
    /// The extension is not one the batch accepts
    Ignore,
}

/// Result of inspecting one file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectReport {
    pub file: PathBuf,
    pub format: Option<AudioFormat>,
    pub duration: f64,
    pub integrity_ok: bool,
    pub integrity_error: Option<String>,
    pub window: TrimWindow,
    pub action: PlannedAction,
}

impl InspectInteractor {
    /// Create new inspect interactor with injected ports
    pub fn new(probe_port: Arc<dyn ProbePort>, fs_port: Arc<dyn FsPort>) -> Self {
        Self {
            probe_port,
            fs_port,
        }
    }

    /// Probe one file and classify it against the trim window
    pub async fn inspect(&self, request: &InspectRequest) -> Result<InspectReport, DomainError> {
        info!("Starting inspection for: {}", request.input.display());

        if !self.fs_port.file_exists(&request.input).await? {
            return Err(DomainError::FileNotFound(
                request.input.display().to_string(),
            ));
        }

        let format = AudioFormat::from_path(&request.input);
        let duration = self.probe_port.probe_duration(&request.input).await?;
        let integrity = self.probe_port.check_integrity(&request.input).await;

        let action = match (format, TrimPolicy::decide(&request.window, duration)) {
            (None, _) => PlannedAction::Ignore,
            (Some(_), TrimDecision::TooShort) => PlannedAction::Skip,
            (Some(_), TrimDecision::Trim { start, retained }) => PlannedAction::Trim {
                start,
                output_duration: retained,
            },
        };

        Ok(InspectReport {
            file: request.input.clone(),
            format,
            duration,
            integrity_ok: integrity.is_ok(),
            integrity_error: integrity.err().map(|e| e.to_string()),
            window: request.window,
            action,
        })
    }
}
