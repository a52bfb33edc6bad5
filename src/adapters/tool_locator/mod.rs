//! Media tool discovery
//!
//! Resolves ffmpeg and ffprobe once at startup. The resolved paths are handed
//! to the adapters explicitly; nothing here touches the process environment.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::errors::DomainError;

const FFMPEG: &str = "ffmpeg";
const FFPROBE: &str = "ffprobe";

/// Resolved media tool binaries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaToolPaths {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
}

/// Finds media tools on the execution path or in well-known fallback locations
#[derive(Debug, Clone, Default)]
pub struct ToolLocator {
    search_path: Option<std::ffi::OsString>,
    fallback_dirs: Vec<PathBuf>,
}

impl ToolLocator {
    /// Locator using the process PATH and the standard fallback directories
    pub fn new() -> Self {
        Self {
            search_path: None,
            fallback_dirs: default_fallback_dirs(),
        }
    }

    /// Locator with an explicit search path and fallback list
    pub fn with_search(
        search_path: impl Into<std::ffi::OsString>,
        fallback_dirs: Vec<PathBuf>,
    ) -> Self {
        Self {
            search_path: Some(search_path.into()),
            fallback_dirs,
        }
    }

    /// Resolve both tools. An explicitly configured path must exist.
    pub fn locate(
        &self,
        explicit_ffmpeg: Option<&Path>,
        explicit_ffprobe: Option<&Path>,
    ) -> Result<MediaToolPaths, DomainError> {
        let ffmpeg = self.resolve(FFMPEG, explicit_ffmpeg, None)?;
        let sibling_dir = ffmpeg.parent().map(Path::to_path_buf);
        let ffprobe = self.resolve(FFPROBE, explicit_ffprobe, sibling_dir.as_deref())?;

        info!(
            ffmpeg = %ffmpeg.display(),
            ffprobe = %ffprobe.display(),
            "Media tools located"
        );
        Ok(MediaToolPaths { ffmpeg, ffprobe })
    }

    fn resolve(
        &self,
        name: &str,
        explicit: Option<&Path>,
        sibling_dir: Option<&Path>,
    ) -> Result<PathBuf, DomainError> {
        if let Some(path) = explicit {
            return if path.is_file() {
                Ok(path.to_path_buf())
            } else {
                Err(DomainError::ToolNotFound(format!(
                    "configured {} path does not exist: {}",
                    name,
                    path.display()
                )))
            };
        }

        let mut searched = Vec::new();

        if let Some(dir) = sibling_dir {
            if let Some(found) = find_in_dir(dir, name) {
                return Ok(found);
            }
            searched.push(dir.display().to_string());
        }

        let on_path = match &self.search_path {
            Some(paths) => {
                let cwd = std::env::current_dir().unwrap_or_default();
                which::which_in(name, Some(paths), cwd)
            }
            None => which::which(name),
        };
        match on_path {
            Ok(found) => return Ok(found),
            Err(e) => {
                debug!("{} not on PATH: {}", name, e);
                searched.push("PATH".to_string());
            }
        }

        for dir in &self.fallback_dirs {
            if let Some(found) = find_in_dir(dir, name) {
                debug!("Using fallback {} at {}", name, found.display());
                return Ok(found);
            }
            searched.push(dir.display().to_string());
        }

        Err(DomainError::ToolNotFound(format!(
            "{} was not found (searched: {}). Install ffmpeg or pass --{} <PATH>",
            name,
            searched.join(", "),
            name
        )))
    }
}

fn executable_name(name: &str) -> String {
    if cfg!(windows) {
        format!("{}.exe", name)
    } else {
        name.to_string()
    }
}

fn find_in_dir(dir: &Path, name: &str) -> Option<PathBuf> {
    let candidate = dir.join(executable_name(name));
    candidate.is_file().then_some(candidate)
}

/// `<exe dir>/ffmpeg/bin`, then the active conda environment's bin directories
fn default_fallback_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir.join("ffmpeg").join("bin"));
    }

    if let Some(prefix) = std::env::var_os("CONDA_PREFIX").filter(|p| !p.is_empty()) {
        let prefix = PathBuf::from(prefix);
        dirs.push(prefix.join("Library").join("bin"));
        dirs.push(prefix.join("bin"));
    }

    dirs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fake_tool(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(executable_name(name));
        fs::write(&path, b"#!/bin/sh\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }
        path
    }

    #[test]
    fn test_explicit_missing_path_is_fatal() {
        let empty = TempDir::new().unwrap();
        let locator = ToolLocator::with_search(empty.path(), vec![]);
        let err = locator
            .locate(Some(Path::new("/definitely/not/here/ffmpeg")), None)
            .unwrap_err();
        assert!(matches!(err, DomainError::ToolNotFound(_)));
    }

    #[test]
    fn test_nothing_found_lists_searched_locations() {
        let empty = TempDir::new().unwrap();
        let fallback = TempDir::new().unwrap();
        let locator = ToolLocator::with_search(empty.path(), vec![fallback.path().to_path_buf()]);

        match locator.locate(None, None) {
            Err(DomainError::ToolNotFound(msg)) => {
                assert!(msg.contains("ffmpeg"));
                assert!(msg.contains("PATH"));
                assert!(msg.contains(&fallback.path().display().to_string()));
            }
            other => panic!("expected ToolNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_fallback_dir_and_sibling_ffprobe() {
        let empty = TempDir::new().unwrap();
        let fallback = TempDir::new().unwrap();
        let ffmpeg = fake_tool(fallback.path(), "ffmpeg");
        let ffprobe = fake_tool(fallback.path(), "ffprobe");

        let locator = ToolLocator::with_search(empty.path(), vec![fallback.path().to_path_buf()]);
        let tools = locator.locate(None, None).unwrap();
        assert_eq!(tools.ffmpeg, ffmpeg);
        assert_eq!(tools.ffprobe, ffprobe);
    }

    #[test]
    fn test_explicit_paths_win() {
        let dir = TempDir::new().unwrap();
        let ffmpeg = fake_tool(dir.path(), "ffmpeg");
        let other = TempDir::new().unwrap();
        let ffprobe = fake_tool(other.path(), "ffprobe");

        let locator = ToolLocator::with_search(dir.path(), vec![]);
        let tools = locator.locate(Some(&ffmpeg), Some(&ffprobe)).unwrap();
        assert_eq!(tools.ffmpeg, ffmpeg);
        assert_eq!(tools.ffprobe, ffprobe);
    }
}
