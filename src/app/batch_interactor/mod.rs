// Batch interactor - Dispatches one job per audio file across a fixed worker pool

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, info_span, warn, Instrument};

use crate::app::trim_interactor::TrimInteractor;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::output::progress::ProgressCallback;
use crate::ports::*;

/// Request for a batch run
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub window: TrimWindow,
}

/// Interactor for the batch trim use case
pub struct BatchInteractor {
    trim_interactor: Arc<TrimInteractor>,
    fs_port: Arc<dyn FsPort>,
    workers: usize,
}

impl BatchInteractor {
    /// Create new batch interactor; `workers` is clamped to at least one
    pub fn new(trim_interactor: Arc<TrimInteractor>, fs_port: Arc<dyn FsPort>, workers: usize) -> Self {
        Self {
            trim_interactor,
            fs_port,
            workers: workers.max(1),
        }
    }

    /// Size of the worker pool
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Enumerate and validate the input, returning one job per accepted file
    pub async fn plan(&self, request: &BatchRequest) -> Result<Vec<TrimJob>, DomainError> {
        if !self.fs_port.directory_exists(&request.input_dir).await? {
            return Err(DomainError::InputDirNotFound(
                request.input_dir.display().to_string(),
            ));
        }

        let input_dir = self.fs_port.canonical_path(&request.input_dir).await?;
        let output_dir = self.fs_port.canonical_path(&request.output_dir).await?;
        if input_dir == output_dir {
            return Err(DomainError::BadArgs(format!(
                "output directory {} is the input directory; trimmed files would overwrite their sources",
                request.output_dir.display()
            )));
        }

        let files = self.fs_port.list_files(&request.input_dir).await?;
        let jobs = JobPlanner::plan(&files, &request.output_dir, request.window);
        if jobs.is_empty() {
            return Err(DomainError::NoAudioFiles(
                request.input_dir.display().to_string(),
            ));
        }

        info!(
            matched = jobs.len(),
            ignored = files.len() - jobs.len(),
            "Found audio files in {}",
            request.input_dir.display()
        );
        Ok(jobs)
    }

    /// Run the whole batch
    pub async fn run(
        &self,
        request: &BatchRequest,
        progress: Arc<dyn ProgressCallback>,
    ) -> Result<BatchSummary, DomainError> {
        let jobs = self.plan(request).await?;
        self.fs_port.create_directory(&request.output_dir).await?;
        Ok(self.dispatch(jobs, progress).await)
    }

    /// Map the per-job function over `jobs` with at most `workers` in flight,
    /// collecting outcomes as they complete
    pub async fn dispatch(
        &self,
        jobs: Vec<TrimJob>,
        progress: Arc<dyn ProgressCallback>,
    ) -> BatchSummary {
        let started = Instant::now();
        let mut summary = BatchSummary::new(jobs.len());
        let permits = Arc::new(Semaphore::new(self.workers));
        let mut tasks = JoinSet::new();

        info!(jobs = jobs.len(), workers = self.workers, "Dispatching jobs");
        progress.on_start(jobs.len() as u64);

        for job in jobs {
            let permits = Arc::clone(&permits);
            let interactor = Arc::clone(&self.trim_interactor);
            tasks.spawn(async move {
                let file_name = job.file_name();
                let _permit = match permits.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => return JobOutcome::failed(file_name, e.to_string()),
                };
                // Run the job on its own task so a panic is contained to this file
                let span = info_span!("job", file = %file_name);
                let worker = tokio::spawn(async move { interactor.process(&job).await }.instrument(span));
                match worker.await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        error!(file = %file_name, "Worker aborted: {}", e);
                        JobOutcome::failed(file_name, format!("worker aborted: {}", e))
                    }
                }
            });
        }

        while let Some(joined) = tasks.join_next().await {
            let outcome = match joined {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("Dispatcher task failed: {}", e);
                    JobOutcome::failed("<unknown>", e.to_string())
                }
            };
            progress.on_job_complete(&outcome);
            summary.record(outcome);
        }

        progress.on_finish();
        summary.elapsed = started.elapsed();
        summary
    }
}
