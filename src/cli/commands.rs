//! Command implementations

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::adapters::{MediaToolPaths, ToolLocator};
use crate::app::{AppContainer, BatchRequest, DefaultAppContainer, InspectRequest};
use crate::cli::args::{InspectArgs, TrimArgs};
use crate::config_initialization::{resolve_settings, AppConfig, CliOverrides, RunSettings};
use crate::output::{
    render_inspect, render_json, render_summary, BarProgress, BatchReport, NoopProgress,
    ProgressCallback,
};

/// Execute the trim command
pub async fn trim(args: TrimArgs, config: &AppConfig) -> Result<()> {
    info!("Starting trim operation");
    info!("Input: {}", args.input.display());
    info!("Output: {}", args.output.display());

    let (settings, tools) = prepare(&args.overrides(), config)?;
    let container = DefaultAppContainer::new(&tools, settings.encode.clone(), settings.workers);

    let request = BatchRequest {
        input_dir: args.input.clone(),
        output_dir: args.output.clone(),
        window: settings.window,
    };
    let progress: Arc<dyn ProgressCallback> = if args.no_progress || args.common.json {
        Arc::new(NoopProgress)
    } else {
        Arc::new(BarProgress::new())
    };

    let summary = container
        .batch_interactor()
        .run(&request, progress)
        .await
        .context("Batch aborted")?;

    if args.common.json {
        let report = BatchReport::new(&summary, &tools, settings.window, settings.workers);
        println!("{}", render_json(&report)?);
    } else {
        print!("{}", render_summary(&summary));
    }

    if summary.has_failures() {
        warn!(failed = summary.failed, "Some files could not be processed");
        if args.fail_on_error {
            anyhow::bail!("{} of {} files failed", summary.failed, summary.total);
        }
    }

    info!("Trim operation completed");
    Ok(())
}

/// Execute the inspect command
pub async fn inspect(args: InspectArgs, config: &AppConfig) -> Result<()> {
    info!("Starting inspect operation");
    info!("Input: {}", args.input.display());

    let (settings, tools) = prepare(&args.overrides(), config)?;
    let container = DefaultAppContainer::new(&tools, settings.encode.clone(), settings.workers);

    let request = InspectRequest {
        input: args.input.clone(),
        window: settings.window,
    };
    let report = container
        .inspect_interactor()
        .inspect(&request)
        .await
        .with_context(|| format!("Failed to inspect {}", args.input.display()))?;

    if args.common.json {
        println!("{}", render_json(&report)?);
    } else {
        print!("{}", render_inspect(&report));
    }

    info!("Inspect operation completed");
    Ok(())
}

/// Resolve settings and media tools. Runs before anything touches the
/// filesystem, so a missing tool aborts with no side effects.
fn prepare(overrides: &CliOverrides, config: &AppConfig) -> Result<(RunSettings, MediaToolPaths)> {
    let settings = resolve_settings(overrides, config).context("Invalid configuration")?;
    let tools = ToolLocator::new()
        .locate(settings.ffmpeg_path.as_deref(), settings.ffprobe_path.as_deref())
        .context("Media tools unavailable")?;
    Ok((settings, tools))
}
