//! Load configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where the export and the persisted state live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetsConfig {
    /// Export directory holding `settings_backup.xml` and `presets/`.
    pub xml_dir: PathBuf,

    /// State file for active/preview/program pointers.
    ///
    /// Without one, state lives in memory and is lost on exit.
    #[serde(default)]
    pub state_path: Option<PathBuf>,
}

impl PresetsConfig {
    pub fn new(xml_dir: impl Into<PathBuf>) -> Self {
        Self {
            xml_dir: xml_dir.into(),
            state_path: None,
        }
    }

    #[must_use]
    pub fn with_state_path(mut self, path: Option<PathBuf>) -> Self {
        self.state_path = path;
        self
    }

    pub fn is_persistent(&self) -> bool {
        self.state_path.is_some()
    }

    pub fn state_path(&self) -> Option<&Path> {
        self.state_path.as_deref()
    }
}
