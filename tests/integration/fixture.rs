use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use antml::fetch;
use antml::{
    Downloader, Extractor, FetchError, FileSystem, LocalFileSystem, ModelResolver,
    PropertyElement, StaticEnvironment, StreamApi,
};

pub(crate) const MODEL_URL: &str = "https://models.example.com/tvm/ssd_mobilenet_v1.tar";
pub(crate) const ARCHIVE_BYTES: &[u8] = b"ssd_mobilenet archive";

/// Downloader that writes a fixed payload and records each call.
#[derive(Clone, Default)]
pub(crate) struct RecordingDownloader {
    calls: Arc<Mutex<Vec<(String, PathBuf)>>>,
    fail: bool,
}

impl RecordingDownloader {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub(crate) fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Downloader for RecordingDownloader {
    fn download(&self, url: &str, destination: &Path) -> fetch::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), destination.to_path_buf()));
        if self.fail {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            });
        }
        std::fs::write(destination, ARCHIVE_BYTES)?;
        Ok(())
    }
}

/// Extractor that drops a `mod.json` into the destination.
#[derive(Clone, Default)]
pub(crate) struct RecordingExtractor {
    calls: Arc<Mutex<Vec<(PathBuf, PathBuf)>>>,
    fail: bool,
}

impl RecordingExtractor {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub(crate) fn calls(&self) -> Vec<(PathBuf, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Extractor for RecordingExtractor {
    fn extract(&self, archive: &Path, destination: &Path) -> fetch::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((archive.to_path_buf(), destination.to_path_buf()));
        if self.fail {
            return Err(FetchError::UnsafePath("../corrupt".to_string()));
        }
        std::fs::write(destination.join("mod.json"), b"{}")?;
        Ok(())
    }
}

/// Local filesystem that counts every access.
#[derive(Clone, Default)]
pub(crate) struct CountingFileSystem {
    accesses: Arc<Mutex<usize>>,
}

impl CountingFileSystem {
    pub(crate) fn accesses(&self) -> usize {
        *self.accesses.lock().unwrap()
    }
}

impl FileSystem for CountingFileSystem {
    fn exists(&self, path: &Path) -> bool {
        *self.accesses.lock().unwrap() += 1;
        LocalFileSystem.exists(path)
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        *self.accesses.lock().unwrap() += 1;
        LocalFileSystem.create_dir(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        *self.accesses.lock().unwrap() += 1;
        LocalFileSystem.remove_file(path)
    }
}

pub(crate) fn resolver(
    root: &Path,
    downloader: &RecordingDownloader,
    extractor: &RecordingExtractor,
) -> ModelResolver {
    ModelResolver::new()
        .with_environment(StaticEnvironment::new().with_var("ANT_ROOT", root.to_string_lossy()))
        .with_downloader(downloader.clone())
        .with_extractor(extractor.clone())
}

/// Stream capability producing in-memory elements.
pub(crate) struct FakeStream {
    pub(crate) initialized: bool,
}

impl StreamApi for FakeStream {
    type Element = PropertyElement;

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn create_element(&self, kind: &str) -> PropertyElement {
        PropertyElement::new(kind)
    }
}
