//! Model artifact resolution.
//!
//! Turns a model archive URL into an extracted directory under
//! `<root>/ml/`, downloading and extracting only what is missing.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{Environment, ProcessEnvironment, ResolverConfig};
use crate::fetch::{
    self, ArchiveExtractor, Downloader, Extractor, FetchError, FileSystem, HttpDownloader,
    LocalFileSystem,
};
use crate::model::reference::ModelReference;

/// Errors that can occur while resolving a model.
#[derive(Error, Debug)]
pub enum ModelResolutionError {
    #[error("{0} is not defined")]
    RootUndefined(String),

    #[error("Invalid model URL: {0}")]
    InvalidSourceUrl(String),

    #[error("Failed to create directory {path:?}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to download {url}: {source}")]
    DownloadFailed {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("Failed to extract {archive:?}: {source}")]
    ExtractFailed {
        archive: PathBuf,
        #[source]
        source: FetchError,
    },
}

pub type Result<T> = std::result::Result<T, ModelResolutionError>;

/// Per-call resolution options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// Download and extract even if the archive or directory already exist.
    #[serde(default)]
    pub overwrite_if_exists: bool,
    /// Hex SHA-256 a freshly downloaded archive must match.
    #[serde(default)]
    pub expected_sha256: Option<String>,
}

impl ResolveOptions {
    pub fn overwrite(overwrite_if_exists: bool) -> Self {
        Self {
            overwrite_if_exists,
            ..Default::default()
        }
    }
}

/// Result of resolving a model URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedModel {
    pub model_name: String,
    pub archive_path: PathBuf,
    pub directory_path: PathBuf,
    /// Whether this call downloaded the archive.
    pub downloaded: bool,
    /// Whether this call extracted the archive.
    pub extracted: bool,
}

/// Resolves model archive URLs to local model directories.
///
/// Calls are blocking and unsynchronized: concurrent resolutions of the same
/// model race on the filesystem and the last writer wins.
pub struct ModelResolver {
    config: ResolverConfig,
    environment: Box<dyn Environment>,
    file_system: Box<dyn FileSystem>,
    downloader: Box<dyn Downloader>,
    extractor: Box<dyn Extractor>,
}

impl ModelResolver {
    /// Create a resolver backed by the process environment, the local
    /// filesystem, HTTP and tar extraction.
    pub fn new() -> Self {
        Self::with_config(ResolverConfig::default())
    }

    pub fn with_config(config: ResolverConfig) -> Self {
        Self {
            config,
            environment: Box::new(ProcessEnvironment),
            file_system: Box::new(LocalFileSystem),
            downloader: Box::new(HttpDownloader::new()),
            extractor: Box::new(ArchiveExtractor::new()),
        }
    }

    pub fn with_environment(mut self, environment: impl Environment + 'static) -> Self {
        self.environment = Box::new(environment);
        self
    }

    pub fn with_file_system(mut self, file_system: impl FileSystem + 'static) -> Self {
        self.file_system = Box::new(file_system);
        self
    }

    pub fn with_downloader(mut self, downloader: impl Downloader + 'static) -> Self {
        self.downloader = Box::new(downloader);
        self
    }

    pub fn with_extractor(mut self, extractor: impl Extractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Ensure the model at `source_url` is present locally and return its
    /// directory.
    pub fn resolve_model(&self, source_url: &str, overwrite_if_exists: bool) -> Result<PathBuf> {
        self.resolve(source_url, &ResolveOptions::overwrite(overwrite_if_exists))
            .map(|resolved| resolved.directory_path)
    }

    /// Resolve with explicit options, reporting what was done.
    pub fn resolve(&self, source_url: &str, options: &ResolveOptions) -> Result<ResolvedModel> {
        let root = self.root_directory()?;
        let reference = ModelReference::parse(source_url, &root, &self.config.model_subdir)
            .ok_or_else(|| ModelResolutionError::InvalidSourceUrl(source_url.to_string()))?;

        log::info!(
            "Resolving model from {} => {:?} => {:?}",
            source_url,
            reference.archive_path,
            reference.directory_path
        );

        if !self.file_system.exists(&reference.model_root_directory) {
            self.create_dir(&reference.model_root_directory)?;
        }

        let downloaded = self.download_if_needed(&reference, options)?;
        let extracted = self.extract_if_needed(&reference, options)?;

        Ok(ResolvedModel {
            model_name: reference.model_name,
            archive_path: reference.archive_path,
            directory_path: reference.directory_path,
            downloaded,
            extracted,
        })
    }

    fn root_directory(&self) -> Result<PathBuf> {
        let name = &self.config.root_env_var;
        match self.environment.var(name) {
            Some(root) if !root.is_empty() => Ok(PathBuf::from(root)),
            _ => {
                log::warn!("{} is not defined", name);
                Err(ModelResolutionError::RootUndefined(name.clone()))
            }
        }
    }

    fn download_if_needed(
        &self,
        reference: &ModelReference,
        options: &ResolveOptions,
    ) -> Result<bool> {
        if self.file_system.exists(&reference.archive_path) {
            log::info!(
                "Model archive already exists ({:?})",
                reference.archive_path
            );
            if !options.overwrite_if_exists {
                log::info!("Skipping archive download");
                return Ok(false);
            }
        }

        log::info!(
            "Downloading model from {} to {:?}",
            reference.source_url,
            reference.archive_path
        );
        self.downloader
            .download(&reference.source_url, &reference.archive_path)
            .and_then(|()| self.verify_archive(reference, options))
            .map_err(|source| {
                log::error!("Error downloading model: {}", source);
                ModelResolutionError::DownloadFailed {
                    url: reference.source_url.clone(),
                    source,
                }
            })?;

        Ok(true)
    }

    /// Check a fresh archive against the expected digest, removing it on
    /// mismatch so it is never reused as a cache hit.
    fn verify_archive(
        &self,
        reference: &ModelReference,
        options: &ResolveOptions,
    ) -> fetch::Result<()> {
        let Some(expected) = &options.expected_sha256 else {
            return Ok(());
        };

        fetch::verify_sha256(&reference.archive_path, expected).map_err(|e| {
            if let Err(remove_err) = self.file_system.remove_file(&reference.archive_path) {
                log::warn!(
                    "Failed to remove unverified archive {:?}: {}",
                    reference.archive_path,
                    remove_err
                );
            }
            e
        })
    }

    fn extract_if_needed(
        &self,
        reference: &ModelReference,
        options: &ResolveOptions,
    ) -> Result<bool> {
        if self.file_system.exists(&reference.directory_path) {
            log::info!(
                "Model directory already exists ({:?})",
                reference.directory_path
            );
            if !options.overwrite_if_exists {
                log::info!("Skipping archive extraction");
                return Ok(false);
            }
        } else {
            self.create_dir(&reference.directory_path)?;
        }

        log::info!(
            "Extracting {:?} to {:?}",
            reference.archive_path,
            reference.directory_path
        );
        self.extractor
            .extract(&reference.archive_path, &reference.directory_path)
            .map_err(|source| {
                log::error!("Error extracting model archive: {}", source);
                ModelResolutionError::ExtractFailed {
                    archive: reference.archive_path.clone(),
                    source,
                }
            })?;

        Ok(true)
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        self.file_system
            .create_dir(path)
            .map_err(|source| ModelResolutionError::CreateDirectory {
                path: path.to_path_buf(),
                source,
            })
    }
}

impl Default for ModelResolver {
    fn default() -> Self {
        Self::new()
    }
}
