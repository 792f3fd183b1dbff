//! Model archive extraction.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Component, Path};

use flate2::read::GzDecoder;
use tar::Archive;

use crate::fetch::{Extractor, FetchError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArchiveFormat {
    TarGz,
    Tar,
}

impl ArchiveFormat {
    fn detect(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(Self::TarGz)
        } else if name.ends_with(".tar") {
            Some(Self::Tar)
        } else {
            None
        }
    }
}

/// Extracts `.tar.gz`, `.tgz` and `.tar` archives.
///
/// Only regular files and directories are written.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchiveExtractor;

impl ArchiveExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for ArchiveExtractor {
    fn extract(&self, archive: &Path, destination: &Path) -> Result<()> {
        let format = ArchiveFormat::detect(archive)
            .ok_or_else(|| FetchError::UnsupportedArchive(archive.to_path_buf()))?;
        let file = File::open(archive)?;

        let count = match format {
            ArchiveFormat::TarGz => unpack(GzDecoder::new(file), destination)?,
            ArchiveFormat::Tar => unpack(file, destination)?,
        };

        log::debug!("Extracted {} entries from {:?}", count, archive);
        Ok(())
    }
}

fn unpack<R: Read>(reader: R, destination: &Path) -> Result<usize> {
    let mut archive = Archive::new(reader);
    let mut count = 0;

    for entry in archive.entries()? {
        let mut entry = entry?;
        let path = entry.path()?.into_owned();

        if !is_contained(&path) {
            return Err(FetchError::UnsafePath(path.to_string_lossy().into_owned()));
        }

        let dest = destination.join(&path);
        let entry_type = entry.header().entry_type();

        // Links and special files are never materialized
        if entry_type.is_dir() {
            std::fs::create_dir_all(&dest)?;
        } else if entry_type.is_file() {
            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut file = File::create(&dest)?;
            io::copy(&mut entry, &mut file)?;
        } else {
            log::debug!("Skipping {:?} entry {:?}", entry_type, path);
            continue;
        }
        count += 1;
    }

    Ok(count)
}

/// Relative path made only of normal components.
fn is_contained(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
