//! Storage engines behind the state store.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::Result;

/// One change to the stored map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateWrite {
    Put { key: String, value: String },
    Delete { key: String },
}

impl StateWrite {
    pub fn key(&self) -> &str {
        match self {
            Self::Put { key, .. } | Self::Delete { key } => key,
        }
    }
}

/// A single-key string map on some storage engine.
///
/// Keys arrive in canonical form. Implementations must make every
/// `apply` durable before returning and must apply all of its writes or
/// none of them.
pub trait StateBackend: fmt::Debug + Send {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn apply(&mut self, writes: &[StateWrite]) -> Result<()>;

    /// Releases the engine. Called once.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Applies writes to an in-memory map.
pub(crate) fn apply_writes(entries: &mut BTreeMap<String, String>, writes: &[StateWrite]) {
    for write in writes {
        match write {
            StateWrite::Put { key, value } => {
                entries.insert(key.clone(), value.clone());
            }
            StateWrite::Delete { key } => {
                entries.remove(key);
            }
        }
    }
}

/// Volatile backend; state is lost with the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: BTreeMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}

impl StateBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn apply(&mut self, writes: &[StateWrite]) -> Result<()> {
        apply_writes(&mut self.entries, writes);
        Ok(())
    }
}
