// Trim interactor - Processes a single job: probe, classify, check, encode

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;

/// Interactor for the per-file trim use case
pub struct TrimInteractor {
    probe_port: Arc<dyn ProbePort>,
    execute_port: Arc<dyn ExecutePort>,
    settings: EncodeSettings,
}

impl TrimInteractor {
    /// Create new trim interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        settings: EncodeSettings,
    ) -> Self {
        Self {
            probe_port,
            execute_port,
            settings,
        }
    }

    /// Process one job. Every failure is folded into the outcome so a
    /// single bad file never aborts the batch.
    pub async fn process(&self, job: &TrimJob) -> JobOutcome {
        let file_name = job.file_name();
        match self.try_process(job).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(file = %file_name, error = %e, "Job failed");
                JobOutcome::failed(file_name, e.to_string())
            }
        }
    }

    async fn try_process(&self, job: &TrimJob) -> Result<JobOutcome, DomainError> {
        let file_name = job.file_name();
        let duration = self.probe_port.probe_duration(&job.input).await?;

        let (start, retained) = match TrimPolicy::decide(&job.window, duration) {
            TrimDecision::TooShort => {
                info!(
                    file = %file_name,
                    duration,
                    trimmed = job.window.total(),
                    "Skipping file too short to trim"
                );
                return Ok(JobOutcome::skipped(file_name, duration));
            }
            TrimDecision::Trim { start, retained } => (start, retained),
        };

        self.probe_port.check_integrity(&job.input).await?;
        debug!(file = %file_name, format = %job.format, "Integrity check passed");

        self.execute_port
            .trim_encode(job, start, retained, &self.settings)
            .await?;

        info!(
            file = %file_name,
            input_duration = duration,
            output_duration = retained,
            "Trimmed"
        );
        Ok(JobOutcome::processed(file_name, duration, retained))
    }
}
