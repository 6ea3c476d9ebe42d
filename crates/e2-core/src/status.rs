//! Read-only views of the preset state for presentation layers.

use serde::Serialize;

use e2_model::{DestinationId, PresetId};

/// What a preset is doing on one of its destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationStatus {
    /// The preset is live on the destination.
    Program,
    /// The preset is staged on the destination.
    Preview,
}

/// State of one preset across its destinations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetStatus {
    pub preset: PresetId,
    pub active: bool,
    /// Per targeted destination; program takes precedence over preview.
    pub destinations: Vec<(DestinationId, Option<DestinationStatus>)>,
}

impl PresetStatus {
    pub fn on_program(&self) -> bool {
        self.has(DestinationStatus::Program)
    }

    pub fn on_preview(&self) -> bool {
        self.has(DestinationStatus::Preview)
    }

    fn has(&self, wanted: DestinationStatus) -> bool {
        self.destinations
            .iter()
            .any(|(_, status)| *status == Some(wanted))
    }
}

/// Whole-state document: everything a client needs to render the presets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateSnapshot {
    pub active: Option<PresetId>,
    pub groups: Vec<GroupSnapshot>,
    pub destinations: Vec<DestinationSnapshot>,
    pub presets: Vec<PresetSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSnapshot {
    pub title: Option<String>,
    /// Member presets sorted by title.
    pub presets: Vec<PresetId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationSnapshot {
    pub outputs: DestinationId,
    pub title: String,
    pub preview: Option<PresetId>,
    pub program: Option<PresetId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetSnapshot {
    pub preset: PresetId,
    pub title: String,
    pub group: Option<String>,
    pub destinations: Vec<DestinationId>,
    pub active: bool,
    pub preview: bool,
    pub program: bool,
}
