// ABOUTME: Archive extraction for the revealprez application
// ABOUTME: Unpacks the cached reveal.js zip into the local template directory

use crate::errors::{PrezError, Result};
use crate::utils;
use log::{debug, info};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use zip::ZipArchive;

const S_IFMT: u32 = 0o170000;
const S_IFREG: u32 = 0o100000;
const S_IFDIR: u32 = 0o040000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnpackOutcome {
    /// The template directory already had content; nothing was touched
    AlreadyPopulated,
    /// This many regular files were extracted
    Extracted(usize),
}

/// Extract `archive` into `template_dir`, stripping the archive's single
/// top-level directory `prefix` from every entry.
///
/// Skipped entirely when `template_dir` already holds anything. Entries
/// outside `prefix` abort the extraction.
pub fn unpack_archive(
    archive: &Path,
    prefix: &str,
    template_dir: &Path,
) -> Result<UnpackOutcome> {
    if utils::directory_has_entries(template_dir)? {
        debug!("Template directory already populated: {:?}", template_dir);
        return Ok(UnpackOutcome::AlreadyPopulated);
    }

    info!("Unpacking {:?} to {:?}", archive, template_dir);
    fs::create_dir_all(template_dir)?;

    let file = fs::File::open(archive)?;
    let mut zip = ZipArchive::new(file)?;
    let mut extracted = 0;
    let mut dir_modes = Vec::new();

    for i in 0..zip.len() {
        let mut entry = zip.by_index(i)?;
        let name = entry.name().to_string();
        let relative = strip_archive_prefix(&name, prefix)?;

        // The top-level directory itself
        if relative.as_os_str().is_empty() {
            continue;
        }

        let destination = template_dir.join(&relative);
        let mode = entry.unix_mode();
        let kind = mode.map(|m| m & S_IFMT).filter(|k| *k != 0);

        if entry.is_dir() || kind == Some(S_IFDIR) {
            create_dir_writable(&destination, mode)?;
            if let Some(mode) = mode {
                dir_modes.push((destination, mode));
            }
        } else if kind.is_none() || kind == Some(S_IFREG) {
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out = fs::File::create(&destination)?;
            io::copy(&mut entry, &mut out)?;
            if let Some(mode) = mode {
                utils::set_mode(&destination, mode)?;
            }
            extracted += 1;
        } else {
            debug!("Skipping non-regular archive entry {}", name);
        }
    }

    // Deepest first, once nothing else needs to be written below them
    for (path, mode) in dir_modes.iter().rev() {
        utils::set_mode(path, *mode)?;
    }

    info!("Extracted {} files", extracted);
    Ok(UnpackOutcome::Extracted(extracted))
}

/// Strip `prefix/` from an archive entry name, rejecting entries outside it
/// and names that would escape the destination.
pub fn strip_archive_prefix(name: &str, prefix: &str) -> Result<PathBuf> {
    let layout_error = || PrezError::ArchiveLayoutError {
        entry: name.to_string(),
        prefix: prefix.to_string(),
    };

    let relative = Path::new(name)
        .strip_prefix(prefix)
        .map_err(|_| layout_error())?;

    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return Err(layout_error());
    }

    Ok(relative.to_path_buf())
}

fn create_dir_writable(path: &Path, mode: Option<u32>) -> Result<()> {
    match fs::create_dir_all(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
        Err(e) => return Err(PrezError::IoError(e)),
    }
    if let Some(mode) = mode {
        utils::set_mode(path, utils::writable_dir_mode(mode))?;
    }
    Ok(())
}
