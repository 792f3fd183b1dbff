//! Transport capabilities used to materialize model artifacts.
//!
//! This module provides:
//! - Blocking HTTP download (`http`)
//! - Archive extraction (`archive`)
//! - Local filesystem access (`local`)

pub mod archive;
pub mod http;
pub mod local;

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use thiserror::Error;

pub use archive::ArchiveExtractor;
pub use http::HttpDownloader;
pub use local::{FileSystem, LocalFileSystem};

/// Errors reported by download and extraction capabilities.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    Integrity { expected: String, actual: String },

    #[error("Unsafe path in archive: {0}")]
    UnsafePath(String),

    #[error("Unsupported archive format: {0:?}")]
    UnsupportedArchive(PathBuf),
}

pub type Result<T> = std::result::Result<T, FetchError>;

/// Fetches `url` into `destination`, blocking until done.
pub trait Downloader {
    fn download(&self, url: &str, destination: &Path) -> Result<()>;
}

/// Unpacks `archive` into the existing directory `destination`.
pub trait Extractor {
    fn extract(&self, archive: &Path, destination: &Path) -> Result<()>;
}

/// Hex-encoded SHA-256 of a file's contents.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0; 8192];

    loop {
        let n = file.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Compare a file's digest against `expected` (case-insensitive hex).
pub fn verify_sha256(path: &Path, expected: &str) -> Result<()> {
    let actual = sha256_file(path)?;
    if !actual.eq_ignore_ascii_case(expected) {
        return Err(FetchError::Integrity {
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(())
}
