//! Console output: progress reporting and final reports

pub mod progress;
pub mod report;

pub use progress::{BarProgress, NoopProgress, ProgressCallback};
pub use report::{render_inspect, render_json, render_summary, BatchReport};
