// ABOUTME: Directory mirroring for the revealprez application
// ABOUTME: Recursively copies a tree preserving structure and file modes

use crate::errors::{PrezError, Result};
use crate::utils;
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Copy `source` recursively into `destination`, returning the number of
/// files copied.
///
/// Existing files are replaced, nothing is deleted. Entries that are
/// neither directories nor regular files are skipped. The first error
/// aborts the walk.
///
/// Directories stay owner-writable while the walk runs; their source modes
/// are applied deepest-first once every file is in place, so read-only
/// trees can be mirrored again on the next build.
pub fn mirror_tree(source: &Path, destination: &Path) -> Result<usize> {
    debug!("Mirroring {:?} -> {:?}", source, destination);
    let mut copied = 0;
    let mut dir_modes = Vec::new();

    for entry in WalkDir::new(source) {
        let entry = entry.map_err(walk_error)?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| PrezError::MirrorError {
                path: entry.path().to_path_buf(),
                source: io::Error::new(io::ErrorKind::Other, e),
            })?;
        let target = destination.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            let metadata = entry.metadata().map_err(walk_error)?;
            let mode = utils::mode_of(&metadata);
            create_dir(&target, mode)?;
            dir_modes.push((target, mode));
        } else if file_type.is_file() {
            remove_existing(&target)?;
            fs::copy(entry.path(), &target).map_err(|e| mirror_error(&target, e))?;
            copied += 1;
        } else {
            debug!("Skipping non-regular entry {:?}", entry.path());
        }
    }

    for (path, mode) in dir_modes.iter().rev() {
        utils::set_mode(path, *mode).map_err(|e| mirror_error(path, e))?;
    }

    Ok(copied)
}

fn create_dir(path: &Path, mode: u32) -> Result<()> {
    match fs::create_dir_all(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
        Err(e) => return Err(mirror_error(path, e)),
    }
    utils::set_mode(path, utils::writable_dir_mode(mode)).map_err(|e| mirror_error(path, e))
}

/// Read-only targets from an earlier build cannot be opened for writing
fn remove_existing(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(mirror_error(path, e)),
    }
}

fn mirror_error(path: &Path, source: io::Error) -> PrezError {
    PrezError::MirrorError {
        path: path.to_path_buf(),
        source,
    }
}

fn walk_error(err: walkdir::Error) -> PrezError {
    let path = err.path().map(Path::to_path_buf).unwrap_or_else(PathBuf::new);
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "filesystem loop"));
    PrezError::MirrorError { path, source }
}
