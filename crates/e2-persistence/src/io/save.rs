//! State file saving.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{PersistenceError, Result};
use crate::types::StateFile;

/// Save the state file.
///
/// Uses atomic write (temp file + fsync + rename + directory fsync) so a
/// crash leaves either the previous or the new state on disk, never a torn
/// file, and a save that returned is not rolled back by a lost rename.
pub fn save_state_file(state: &StateFile, path: &Path) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(state)
        .map_err(|e| PersistenceError::Serialization { source: e })?;

    let temp_path = temp_path_for(path);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PersistenceError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(&temp_path).map_err(|e| PersistenceError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(&bytes).map_err(|e| PersistenceError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;

    file.sync_all().map_err(|e| PersistenceError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;
    drop(file);

    fs::rename(&temp_path, path).map_err(|e| PersistenceError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    // The rename is only durable once the directory entry is on disk.
    sync_parent_dir(path)?;

    tracing::debug!(path = %path.display(), entries = state.entries.len(), "saved state");
    Ok(())
}

/// Flushes the directory holding `path` so a completed rename survives a
/// power loss.
#[cfg(unix)]
pub(crate) fn sync_parent_dir(path: &Path) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    File::open(parent)
        .and_then(|dir| dir.sync_all())
        .map_err(|e| PersistenceError::Io {
            operation: "sync directory",
            path: parent.to_path_buf(),
            source: e,
        })
}

/// Directories cannot be opened for syncing here; the rename is as durable
/// as the platform makes it.
#[cfg(not(unix))]
pub(crate) fn sync_parent_dir(_path: &Path) -> Result<()> {
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_state_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/state.json");

        let mut state = StateFile::new();
        state.entries.insert("active".into(), "1".into());
        save_state_file(&state, &path).unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("nested/state.json.tmp").exists());
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"e2-preset-state\""));
    }

    #[cfg(unix)]
    #[test]
    fn test_sync_parent_dir() {
        let dir = tempdir().unwrap();
        sync_parent_dir(&dir.path().join("state.json")).unwrap();
        sync_parent_dir(Path::new("state.json")).unwrap();

        let missing = dir.path().join("missing/state.json");
        match sync_parent_dir(&missing) {
            Err(PersistenceError::Io {
                operation, path, ..
            }) => {
                assert_eq!(operation, "sync directory");
                assert_eq!(path, dir.path().join("missing"));
            }
            other => panic!("expected directory sync failure, got {other:?}"),
        }
    }
}
