//! Logging configuration and subscriber setup

use std::io::IsTerminal;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::{TrimError, TrimResult};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
    /// JSON format for structured logging
    Json,
}

/// Logging configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (e.g. `info`, `audiotrim=debug`)
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
        }
    }
}

/// Logging system manager
pub struct LoggingSystem {
    config: LoggingConfig,
}

impl LoggingSystem {
    /// Create a new logging system with configuration
    pub fn new(config: LoggingConfig) -> Self {
        Self { config }
    }

    /// Build the filter: `RUST_LOG` wins, otherwise the configured level
    pub fn filter(&self) -> TrimResult<EnvFilter> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.config.level).map_err(|e| TrimError::LoggingInit {
            message: format!("invalid log level '{}': {}", self.config.level, e),
        })
    }

    /// Install the global subscriber. Logs go to stderr so stdout only
    /// carries reports.
    pub fn initialize(&self) -> TrimResult<()> {
        let filter = self.filter()?;
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(std::io::stderr().is_terminal())
            .with_writer(std::io::stderr);

        let result = match self.config.format {
            LogFormat::Pretty => builder.pretty().try_init(),
            LogFormat::Compact => builder.compact().with_target(false).try_init(),
            LogFormat::Json => builder.json().try_init(),
        };
        result.map_err(|e| TrimError::LoggingInit {
            message: e.to_string(),
        })?;

        self.log_system_info();
        Ok(())
    }

    /// Log system information
    pub fn log_system_info(&self) {
        tracing::debug!("audiotrim {}", env!("CARGO_PKG_VERSION"));
        tracing::debug!("Logging level: {}", self.config.level);
        tracing::debug!("Output format: {:?}", self.config.format);
    }
}

impl Default for LoggingSystem {
    fn default() -> Self {
        Self::new(LoggingConfig::default())
    }
}
