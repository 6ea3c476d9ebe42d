//! State file loading.

use std::fs;
use std::path::Path;

use crate::error::{PersistenceError, Result};
use crate::types::{CURRENT_SCHEMA_VERSION, FORMAT_MARKER, StateFile};

/// Load a state file, validating marker and schema version.
pub fn load_state_file(path: &Path) -> Result<StateFile> {
    let bytes = fs::read(path).map_err(|e| PersistenceError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;

    let state: StateFile =
        serde_json::from_slice(&bytes).map_err(|e| PersistenceError::Deserialization {
            path: path.to_path_buf(),
            source: e,
        })?;

    if state.format != FORMAT_MARKER {
        return Err(PersistenceError::InvalidFormat {
            path: path.to_path_buf(),
            reason: format!("unexpected format marker {:?}", state.format),
        });
    }

    if state.version > CURRENT_SCHEMA_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            found: state.version,
            max_supported: CURRENT_SCHEMA_VERSION,
            path: path.to_path_buf(),
        });
    }

    tracing::debug!(path = %path.display(), entries = state.entries.len(), "loaded state");
    Ok(state)
}
