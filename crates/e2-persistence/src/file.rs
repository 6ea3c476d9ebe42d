//! Durable backend keeping the whole map in one JSON state file.

use std::path::{Path, PathBuf};

use crate::backend::{StateBackend, StateWrite, apply_writes};
use crate::error::Result;
use crate::io::{load_state_file, save_state_file};
use crate::types::StateFile;

/// Backend persisting every change by atomically rewriting a state file.
///
/// The map is small (one entry per destination and projection), so each
/// commit rewrites the file in full. A commit that fails to reach disk
/// leaves the cached map untouched.
#[derive(Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
    state: StateFile,
}

impl JsonFileBackend {
    /// Opens the state file, creating an empty one if it does not exist.
    pub fn open(path: &Path) -> Result<Self> {
        let state = if path.exists() {
            load_state_file(path)?
        } else {
            let state = StateFile::new();
            save_state_file(&state, path)?;
            tracing::info!(path = %path.display(), "created state file");
            state
        };
        Ok(Self {
            path: path.to_path_buf(),
            state,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateBackend for JsonFileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.state.entries.get(key).cloned())
    }

    fn apply(&mut self, writes: &[StateWrite]) -> Result<()> {
        let mut next = self.state.clone();
        apply_writes(&mut next.entries, writes);
        save_state_file(&next, &self.path)?;
        self.state = next;
        Ok(())
    }
}
