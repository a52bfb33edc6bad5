// Local filesystem adapter - File system operations for the batch dispatcher

use crate::domain::errors::*;
use crate::ports::*;
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Local filesystem adapter
pub struct LocalFsAdapter;

impl LocalFsAdapter {
    /// Create new local filesystem adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFsAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FsPort for LocalFsAdapter {
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError> {
        Ok(file_path.is_file())
    }

    async fn directory_exists(&self, dir_path: &Path) -> Result<bool, DomainError> {
        Ok(dir_path.is_dir())
    }

    async fn list_files(&self, dir_path: &Path) -> Result<Vec<PathBuf>, DomainError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(dir_path).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                DomainError::FsFail(format!(
                    "Failed to read directory {}: {}",
                    dir_path.display(),
                    e
                ))
            })?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    async fn canonical_path(&self, path: &Path) -> Result<PathBuf, DomainError> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|e| {
                    DomainError::FsFail(format!("Failed to read working directory: {}", e))
                })?
                .join(path)
        };

        let mut missing = Vec::new();
        let mut current = absolute.as_path();
        loop {
            if let Ok(resolved) = fs::canonicalize(current) {
                return Ok(missing
                    .iter()
                    .rev()
                    .fold(resolved, |acc: PathBuf, part| acc.join(part)));
            }
            match (current.parent(), current.file_name()) {
                (Some(parent), Some(name)) => {
                    missing.push(name.to_os_string());
                    current = parent;
                }
                _ => return Ok(absolute),
            }
        }
    }

    async fn create_directory(&self, dir_path: &Path) -> Result<(), DomainError> {
        fs::create_dir_all(dir_path).map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to create directory {}: {}",
                dir_path.display(),
                e
            ))
        })?;
        Ok(())
    }
}
