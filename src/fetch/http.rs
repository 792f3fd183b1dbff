//! Blocking HTTP download of model archives.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;

use crate::defaults::{DOWNLOAD_TIMEOUT_SECS, PARTIAL_DOWNLOAD_EXTENSION};
use crate::fetch::{Downloader, FetchError, Result};

/// HTTP downloader.
///
/// Writes into a `.part` sibling and renames it into place once the whole
/// body has been received, so an interrupted transfer never looks like a
/// complete archive.
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    /// Create a downloader with the default request timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
    }

    /// Create a downloader with `timeout`, falling back to an untimed
    /// client if the configured one cannot be built.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::try_with_timeout(timeout).unwrap_or_else(|e| {
            log::warn!("Failed to build HTTP client with {:?} timeout: {}", timeout, e);
            Self {
                client: Client::new(),
            }
        })
    }

    pub fn try_with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("antml/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

impl Default for HttpDownloader {
    fn default() -> Self {
        Self::new()
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, url: &str, destination: &Path) -> Result<()> {
        let part_path = partial_path(destination);
        log::debug!("Downloading {} to {:?}", url, part_path);

        let mut response = self.client.get(url).send()?;
        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let bytes = write_body(&mut response, &part_path, destination)?;
        log::debug!("Downloaded {} bytes to {:?}", bytes, destination);
        Ok(())
    }
}

/// Stream `body` into `part_path` and rename it to `destination`. On failure
/// the partial file is removed.
fn write_body<R: Read>(body: &mut R, part_path: &Path, destination: &Path) -> Result<u64> {
    copy_into_place(body, part_path, destination).map_err(|e| {
        if part_path.exists() {
            if let Err(remove_err) = std::fs::remove_file(part_path) {
                log::warn!("Failed to remove {:?}: {}", part_path, remove_err);
            }
        }
        e
    })
}

fn copy_into_place<R: Read>(body: &mut R, part_path: &Path, destination: &Path) -> Result<u64> {
    let mut file = File::create(part_path)?;
    let bytes = io::copy(body, &mut file)?;
    file.flush()?;
    drop(file);

    std::fs::rename(part_path, destination)?;
    Ok(bytes)
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(PARTIAL_DOWNLOAD_EXTENSION);
    destination.with_file_name(name)
}
