//! Progress reporting for batch runs

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::domain::model::JobOutcome;

/// Progress callback trait for batch runs
pub trait ProgressCallback: Send + Sync {
    /// Called once before any job is dispatched
    fn on_start(&self, total_jobs: u64);

    /// Called each time a job finishes, in completion order
    fn on_job_complete(&self, outcome: &JobOutcome);

    /// Called after the last job
    fn on_finish(&self);
}

/// Discards all progress events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_start(&self, _total_jobs: u64) {}

    fn on_job_complete(&self, _outcome: &JobOutcome) {}

    fn on_finish(&self) {}
}

/// Terminal progress bar, cleared when the batch finishes
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    /// Create a hidden bar; it is sized and drawn on `on_start`
    pub fn new() -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Self { bar }
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressCallback for BarProgress {
    fn on_start(&self, total_jobs: u64) {
        self.bar.set_length(total_jobs);
        self.bar.set_message("Processing");
        self.bar.enable_steady_tick(Duration::from_millis(100));
    }

    fn on_job_complete(&self, outcome: &JobOutcome) {
        self.bar.set_message(outcome.file_name.clone());
        self.bar.inc(1);
    }

    fn on_finish(&self) {
        self.bar.finish_and_clear();
    }
}
