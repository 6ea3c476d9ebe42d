//! Thread-safe handle over [`Presets`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use e2_model::PresetId;

use crate::error::Result;
use crate::notify::{SubscriberError, SubscriptionId};
use crate::state::Presets;
use crate::status::StateSnapshot;

/// Cloneable handle serializing every transition through one lock.
///
/// Subscribers run while the lock is held and must not call back into the
/// handle.
#[derive(Debug, Clone)]
pub struct SharedPresets {
    inner: Arc<Mutex<Presets>>,
}

impl SharedPresets {
    pub fn new(presets: Presets) -> Self {
        Self {
            inner: Arc::new(Mutex::new(presets)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Presets> {
        // A panicking subscriber is caught inside notify, so the state
        // behind a poisoned lock is still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` with exclusive access to the presets.
    pub fn with<R>(&self, f: impl FnOnce(&mut Presets) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn activate_preview(&self, id: PresetId) -> Result<PresetId> {
        self.lock().activate_preview(id).map(|preset| preset.id())
    }

    pub fn activate_program(&self) -> Result<PresetId> {
        self.lock().activate_program().map(|preset| preset.id())
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: FnMut() -> std::result::Result<(), SubscriberError> + Send + 'static,
    {
        self.lock().subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.lock().unsubscribe(id)
    }

    pub fn snapshot(&self) -> StateSnapshot {
        self.lock().snapshot()
    }
}
