//! Error types for graph construction and preset activation.

use std::path::PathBuf;

use e2_ingest::IngestError;
use e2_model::{DestinationId, PresetId};
use e2_persistence::PersistenceError;
use thiserror::Error;

/// Errors raised while loading the preset graph or changing its state.
#[derive(Debug, Error)]
pub enum PresetsError {
    // === Load Errors (abort startup) ===
    /// An export document is unreadable or structurally wrong.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Two destinations share an identity.
    #[error("duplicate destination {id} in {duplicate} (first declared in {first})")]
    DuplicateDestination {
        id: DestinationId,
        first: PathBuf,
        duplicate: PathBuf,
    },

    /// Two presets share an identity, possibly across documents.
    #[error("duplicate preset {id} in {duplicate} (first declared in {first})")]
    DuplicatePreset {
        id: PresetId,
        first: PathBuf,
        duplicate: PathBuf,
    },

    /// A preset targets a destination the settings do not declare.
    #[error("preset {preset} in {path} references unknown destination {destination}")]
    UnresolvedDestination {
        preset: PresetId,
        destination: DestinationId,
        path: PathBuf,
    },

    // === Request Errors (returned to the caller, state untouched) ===
    /// The requested preset does not exist.
    #[error("unknown preset {0}")]
    UnknownPreset(PresetId),

    /// The request could not be understood.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Program was requested before any preset was previewed.
    #[error("no active preset: preview a preset before taking it to program")]
    NoActivePreset,

    // === State Errors ===
    /// Reading or writing persisted state failed.
    #[error("preset state: {0}")]
    Persistence(#[from] PersistenceError),
}

impl PresetsError {
    /// Whether the error rejects a caller's request rather than signalling
    /// a broken configuration or store.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownPreset(_) | Self::InvalidRequest(_) | Self::NoActivePreset
        )
    }
}

/// Result type alias for graph and state operations.
pub type Result<T> = std::result::Result<T, PresetsError>;
