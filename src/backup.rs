// Author: kelexine (https://github.com/kelexine)
// backup.rs -- Copies sources aside before they are edited in place

use std::fs;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum BackupError {
    #[error("Backup path has invalid format: {0}")]
    InvalidPath(String),

    #[error("Failed to create backup directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Heuristic check that `s` names a directory rather than a file.
///
/// The last segment must not carry an extension (leading-dot names are fine)
/// and the path must have at least two segments, start with `./`, or be
/// absolute.
pub fn looks_like_dir_path(s: &str) -> bool {
    let trimmed = s.trim();
    if trimmed.chars().count() < 3 {
        return false;
    }

    let path = Path::new(trimmed);
    let parts: Vec<Component> = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    let last = parts
        .last()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .unwrap_or_default();
    if last.contains('.') && !last.starts_with('.') {
        return false;
    }

    parts.len() >= 2 || trimmed.starts_with("./") || path.is_absolute()
}

/// Copy `file` to `<dir>/<file name>.bak`, creating `dir` when missing.
pub fn make_file_backup(file: &Path, dir: &str) -> Result<PathBuf, BackupError> {
    if !looks_like_dir_path(dir) {
        return Err(BackupError::InvalidPath(dir.to_string()));
    }

    let dir = Path::new(dir.trim());
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| BackupError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let target = dir.join(format!("{name}.bak"));

    fs::copy(file, &target).map_err(|source| BackupError::Copy {
        from: file.to_path_buf(),
        to: target.clone(),
        source,
    })?;

    info!("Backup created: {}", target.display());
    Ok(target)
}
