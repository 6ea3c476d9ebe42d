//! The state store: composite keys and caller codecs over a backend.

use std::path::Path;

use tracing::Span;

use crate::backend::{MemoryBackend, StateBackend, StateWrite};
use crate::codec::StateCodec;
use crate::error::{PersistenceError, Result};
use crate::file::JsonFileBackend;
use crate::key::StateKey;

/// Writes committed to the store as one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateBatch {
    writes: Vec<StateWrite>,
}

impl StateBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<C: StateCodec>(&mut self, key: &StateKey, value: &C::Value, codec: &C) {
        self.writes.push(StateWrite::Put {
            key: key.canonical(),
            value: codec.encode(value),
        });
    }

    pub fn remove(&mut self, key: &StateKey) {
        self.writes.push(StateWrite::Delete {
            key: key.canonical(),
        });
    }

    pub fn writes(&self) -> &[StateWrite] {
        &self.writes
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}

/// Durable map from [`StateKey`]s to codec-encoded values.
///
/// Opened once at startup and closed once at shutdown. Dropping an open
/// store closes it.
#[derive(Debug)]
pub struct StateStore {
    backend: Option<Box<dyn StateBackend>>,
    span: Span,
}

impl StateStore {
    /// Opens (or creates) a JSON state file.
    pub fn open(path: &Path) -> Result<Self> {
        let span = tracing::info_span!("state_store", path = %path.display());
        let backend = {
            let _guard = span.enter();
            let backend = JsonFileBackend::open(path)?;
            tracing::info!("opened state store");
            backend
        };
        Ok(Self {
            backend: Some(Box::new(backend)),
            span,
        })
    }

    /// A store that forgets everything when dropped.
    pub fn in_memory() -> Self {
        Self::with_backend(MemoryBackend::new())
    }

    pub fn with_backend(backend: impl StateBackend + 'static) -> Self {
        Self {
            backend: Some(Box::new(backend)),
            span: tracing::info_span!("state_store", path = "<custom>"),
        }
    }

    fn backend(&self) -> Result<&dyn StateBackend> {
        self.backend.as_deref().ok_or(PersistenceError::Closed)
    }

    fn backend_mut(&mut self) -> Result<&mut (dyn StateBackend + 'static)> {
        self.backend.as_deref_mut().ok_or(PersistenceError::Closed)
    }

    /// The stored string for `key`, if any.
    pub fn get_raw(&self, key: &StateKey) -> Result<Option<String>> {
        self.backend()?.get(&key.canonical())
    }

    /// Decoded value for `key`; `None` when the key is unset.
    pub fn get<C: StateCodec>(&self, key: &StateKey, codec: &C) -> Result<Option<C::Value>> {
        let Some(raw) = self.get_raw(key)? else {
            return Ok(None);
        };
        codec
            .decode(&raw)
            .map(Some)
            .map_err(|reason| PersistenceError::Decode {
                key: key.canonical(),
                value: raw,
                reason,
            })
    }

    pub fn set<C: StateCodec>(&mut self, key: &StateKey, value: &C::Value, codec: &C) -> Result<()> {
        let mut batch = StateBatch::new();
        batch.set(key, value, codec);
        self.commit(batch)
    }

    pub fn remove(&mut self, key: &StateKey) -> Result<()> {
        let mut batch = StateBatch::new();
        batch.remove(key);
        self.commit(batch)
    }

    /// Durably applies every write of the batch, or none of them.
    pub fn commit(&mut self, batch: StateBatch) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }
        let span = self.span.clone();
        let _guard = span.enter();
        self.backend_mut()?.apply(batch.writes())?;
        for write in batch.writes() {
            match write {
                StateWrite::Put { key, value } => tracing::debug!(%key, %value, "stored"),
                StateWrite::Delete { key } => tracing::debug!(%key, "removed"),
            }
        }
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.backend.is_some()
    }

    /// Releases the backend. Closing twice is a no-op.
    pub fn close(&mut self) -> Result<()> {
        let Some(mut backend) = self.backend.take() else {
            return Ok(());
        };
        let _guard = self.span.enter();
        backend.close()?;
        tracing::info!("closed state store");
        Ok(())
    }
}

impl Drop for StateStore {
    fn drop(&mut self) {
        if let Err(error) = self.close() {
            tracing::error!(%error, "failed to close state store");
        }
    }
}
