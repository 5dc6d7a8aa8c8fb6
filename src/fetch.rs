// ABOUTME: Download handling for the revealprez application
// ABOUTME: Fetches the versioned reveal.js archive once and caches it on disk

use crate::errors::{PrezError, Result};
use log::{debug, info};
use reqwest::blocking::Client;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What `fetch_archive` had to do to make the archive available
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The archive was already on disk
    Cached,
    /// The archive was downloaded, with this many bytes
    Downloaded(u64),
}

/// Make sure `destination` exists, downloading it from `url` if it does not.
///
/// Presence of the file is the only cache check. The body is streamed to a
/// `.part` sibling first and renamed into place once complete.
pub fn fetch_archive(url: &str, destination: &Path) -> Result<FetchOutcome> {
    if destination.exists() {
        debug!("Archive already cached: {:?}", destination);
        return Ok(FetchOutcome::Cached);
    }

    info!("Downloading {}...", url);

    let client = Client::builder()
        .timeout(Duration::from_secs(120))
        .build()?;

    let mut response = client.get(url).send()?;
    let status = response.status().as_u16();
    if status >= 300 {
        return Err(PrezError::HttpStatusError {
            url: url.to_string(),
            status,
        });
    }

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }

    let partial = partial_path(destination);
    let mut file = fs::File::create(&partial)?;
    let written = response.copy_to(&mut file)?;
    io::Write::flush(&mut file)?;
    drop(file);
    fs::rename(&partial, destination)?;

    info!("Saved {} bytes to {:?}", written, destination);
    Ok(FetchOutcome::Downloaded(written))
}

/// `<destination>.part`, where a download is written until it completes
pub fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    destination.with_file_name(name)
}
