// TOML config adapter - Configuration loaded from an `[audiotrim]` table

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config_initialization::{AppConfig, DEFAULT_CONFIG_FILE};
use crate::domain::errors::*;
use crate::ports::*;

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    audiotrim: AppConfig,
}

/// TOML configuration adapter
pub struct TomlConfigAdapter {
    explicit_path: Option<PathBuf>,
    default_path: PathBuf,
}

impl TomlConfigAdapter {
    /// Adapter reading `explicit_path` if given, else `./audiotrim.toml` when present
    pub fn new(explicit_path: Option<PathBuf>) -> Self {
        Self {
            explicit_path,
            default_path: PathBuf::from(DEFAULT_CONFIG_FILE),
        }
    }

    /// Deserialize config from TOML string
    pub fn parse(toml_content: &str) -> Result<AppConfig, DomainError> {
        let parsed: ConfigFile = toml::from_str(toml_content)
            .map_err(|e| DomainError::Config(format!("Failed to parse TOML config: {}", e)))?;
        Ok(parsed.audiotrim)
    }

    fn read(path: &Path) -> Result<AppConfig, DomainError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&content)
    }
}

impl ConfigPort for TomlConfigAdapter {
    fn load(&self) -> Result<AppConfig, DomainError> {
        match self.source_path() {
            Some(path) => Self::read(&path),
            None => Ok(AppConfig::default()),
        }
    }

    fn source_path(&self) -> Option<PathBuf> {
        match &self.explicit_path {
            // An explicit path is always used, so a missing file is reported
            Some(path) => Some(path.clone()),
            None => self
                .default_path
                .is_file()
                .then(|| self.default_path.clone()),
        }
    }
}
