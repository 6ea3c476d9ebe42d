//! On-disk state file contents.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Marker identifying a preset state file.
pub const FORMAT_MARKER: &str = "e2-preset-state";

/// Current schema version.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// The state file: a format marker, a schema version and the key/value map.
///
/// ```text
/// {
///   "format": "e2-preset-state",
///   "version": 1,
///   "entries": { "active": "4", "preview/1,2": "4" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateFile {
    pub format: String,
    pub version: u32,
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

impl StateFile {
    pub fn new() -> Self {
        Self {
            format: FORMAT_MARKER.to_string(),
            version: CURRENT_SCHEMA_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

impl Default for StateFile {
    fn default() -> Self {
        Self::new()
    }
}
