//! Export directory layout.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Settings document name inside an export directory.
pub const SETTINGS_FILE: &str = "settings_backup.xml";

/// Directory of preset documents inside an export directory.
pub const PRESETS_DIR: &str = "presets";

/// The documents making up one configuration export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLayout {
    /// The `<System>` settings document.
    pub settings: PathBuf,
    /// `<PresetMgr>` documents, sorted by file name.
    pub presets: Vec<PathBuf>,
}

impl ExportLayout {
    /// Locates the settings document and preset documents below `dir`.
    pub fn discover(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(IngestError::DirectoryNotFound {
                path: dir.to_path_buf(),
            });
        }

        let settings = dir.join(SETTINGS_FILE);
        if !settings.is_file() {
            return Err(IngestError::FileNotFound { path: settings });
        }

        let presets = list_xml_files(&dir.join(PRESETS_DIR))?;
        tracing::debug!(
            dir = %dir.display(),
            presets = presets.len(),
            "discovered export layout"
        );

        Ok(Self { settings, presets })
    }
}

/// Lists all XML files directly inside a directory.
///
/// Returns files sorted by filename.
pub fn list_xml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let is_xml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));

        if is_xml {
            files.push(path);
        } else {
            tracing::debug!(path = %path.display(), "skipping non-XML file");
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}
