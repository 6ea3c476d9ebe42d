//! Tagged records emitted by the ingestor.

use std::path::{Path, PathBuf};

use e2_model::{DestinationId, DestinationKind, PresetId};

/// Which entity a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Destination,
    Preset,
}

/// A destination declared by the settings document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationRecord {
    pub id: DestinationId,
    pub kind: DestinationKind,
    pub title: String,
    /// Document the record was read from.
    pub source: PathBuf,
}

/// A preset declared by one of the preset documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetRecord {
    pub id: PresetId,
    pub title: String,
    /// Group title from the `"<title> @ <group>"` naming convention.
    pub group: Option<String>,
    /// Referenced destinations in document order.
    pub destinations: Vec<DestinationId>,
    pub source: PathBuf,
}

/// One `(kind, identity, attributes)` record of the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Destination(DestinationRecord),
    Preset(PresetRecord),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Destination(_) => RecordKind::Destination,
            Self::Preset(_) => RecordKind::Preset,
        }
    }

    pub fn source(&self) -> &Path {
        match self {
            Self::Destination(record) => &record.source,
            Self::Preset(record) => &record.source,
        }
    }
}

impl From<DestinationRecord> for Record {
    fn from(record: DestinationRecord) -> Self {
        Self::Destination(record)
    }
}

impl From<PresetRecord> for Record {
    fn from(record: PresetRecord) -> Self {
        Self::Preset(record)
    }
}
