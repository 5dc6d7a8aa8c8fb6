// ABOUTME: Utility functions for the revealprez application
// ABOUTME: Provides helpers for path resolution and directory checks

use crate::errors::{PrezError, Result};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    } else if !path.is_dir() {
        return Err(PrezError::ConfigError(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    }
    Ok(())
}

/// Returns true when `path` is a directory holding at least one entry.
/// A missing directory counts as empty.
pub fn directory_has_entries(path: &Path) -> Result<bool> {
    match fs::read_dir(path) {
        Ok(mut entries) => Ok(entries.next().is_some()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(PrezError::IoError(e)),
    }
}

/// Get the absolute path without requiring it to exist.
/// `.` components are dropped, `..` are kept as-is.
pub fn get_absolute_path(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| {
                PrezError::ConfigError(format!(
                    "Failed to get absolute path for {:?}: {}",
                    path, e
                ))
            })?
            .join(path)
    };

    Ok(joined
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect())
}

/// Copy unix permission bits onto `path`. A no-op elsewhere.
#[cfg(unix)]
pub fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o7777))
}

#[cfg(not(unix))]
pub fn set_mode(_path: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}

/// `mode` with owner read, write and search added, so entries can be
/// created inside the directory before its final mode is applied
pub fn writable_dir_mode(mode: u32) -> u32 {
    mode | 0o700
}

/// Read the unix permission bits of `metadata`
#[cfg(unix)]
pub fn mode_of(metadata: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode()
}

#[cfg(not(unix))]
pub fn mode_of(_metadata: &fs::Metadata) -> u32 {
    0o755
}
