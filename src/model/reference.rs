//! Local paths derived from a model's source URL.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A model archive URL together with the paths it maps to under a root.
///
/// Two URLs ending in the same file name map to the same paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelReference {
    pub source_url: String,
    pub archive_file_name: String,
    pub model_name: String,
    pub model_root_directory: PathBuf,
    pub archive_path: PathBuf,
    pub directory_path: PathBuf,
}

impl ModelReference {
    /// Derive the reference for `source_url` below `<root>/<model_subdir>`.
    ///
    /// Returns `None` when the URL has no `/`, or its last segment has no
    /// extension or an empty stem.
    pub fn parse(source_url: &str, root: &Path, model_subdir: &str) -> Option<Self> {
        let slash = source_url.rfind('/')?;
        let archive_file_name = &source_url[slash + 1..];

        let dot = archive_file_name.rfind('.')?;
        let model_name = &archive_file_name[..dot];
        if model_name.is_empty() || dot + 1 == archive_file_name.len() {
            return None;
        }

        let model_root_directory = root.join(model_subdir);
        Some(Self {
            source_url: source_url.to_string(),
            archive_file_name: archive_file_name.to_string(),
            model_name: model_name.to_string(),
            archive_path: model_root_directory.join(archive_file_name),
            directory_path: model_root_directory.join(model_name),
            model_root_directory,
        })
    }
}
