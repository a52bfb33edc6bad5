// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::config_initialization::AppConfig;
use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for media file probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Duration of the file's container in seconds
    async fn probe_duration(&self, file_path: &Path) -> Result<f64, DomainError>;

    /// Decode the whole file and report whether it reads cleanly
    async fn check_integrity(&self, file_path: &Path) -> Result<(), DomainError>;
}

/// Port for the trim / transcode step
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Cut `start` seconds off the front and keep `retained` seconds,
    /// writing the re-encoded result to `job.output`
    async fn trim_encode(
        &self,
        job: &TrimJob,
        start: f64,
        retained: f64,
        settings: &EncodeSettings,
    ) -> Result<(), DomainError>;
}

/// Port for file system operations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if a regular file exists
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError>;

    /// Check if directory exists
    async fn directory_exists(&self, dir_path: &Path) -> Result<bool, DomainError>;

    /// Regular files directly inside a directory (not recursive)
    async fn list_files(&self, dir_path: &Path) -> Result<Vec<PathBuf>, DomainError>;

    /// Absolute form of `path` with symlinks and `.`/`..` resolved as far as
    /// the path exists; missing trailing components are appended unchanged
    async fn canonical_path(&self, path: &Path) -> Result<PathBuf, DomainError>;

    /// Create directory (including parent directories)
    async fn create_directory(&self, dir_path: &Path) -> Result<(), DomainError>;
}

/// Port for configuration management
pub trait ConfigPort: Send + Sync {
    /// Load configuration, falling back to defaults for anything unset
    fn load(&self) -> Result<AppConfig, DomainError>;

    /// Path the configuration came from, if any
    fn source_path(&self) -> Option<PathBuf>;
}
