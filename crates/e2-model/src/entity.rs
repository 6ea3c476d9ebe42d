//! Entities of the preset graph.
//!
//! Entities refer to each other by identity. The graph that owns them
//! resolves identities back to entities.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::{DestinationId, GroupKey, PresetId};

/// Flavor of a destination in the switcher settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationKind {
    /// Single physical output (`AuxDest`).
    Aux,
    /// Screen spanning one or more outputs (`ScreenDest`).
    Screen,
}

/// A physical or composite video output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    id: DestinationId,
    kind: DestinationKind,
    title: String,
    preview: Option<PresetId>,
    program: Option<PresetId>,
}

impl Destination {
    pub fn new(id: DestinationId, kind: DestinationKind, title: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
            preview: None,
            program: None,
        }
    }

    pub fn id(&self) -> &DestinationId {
        &self.id
    }

    pub fn kind(&self) -> DestinationKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Preset currently staged on this destination.
    pub fn preview(&self) -> Option<PresetId> {
        self.preview
    }

    /// Preset currently live on this destination.
    pub fn program(&self) -> Option<PresetId> {
        self.program
    }

    pub fn set_preview(&mut self, preset: Option<PresetId>) {
        self.preview = preset;
    }

    pub fn set_program(&mut self, preset: Option<PresetId>) {
        self.program = preset;
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// A saved switcher configuration targeting a fixed set of destinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    id: PresetId,
    title: String,
    group: GroupKey,
    group_title: Option<String>,
    destinations: Vec<DestinationId>,
}

impl Preset {
    /// Builds a preset; repeated destinations keep their first position.
    pub fn new(
        id: PresetId,
        title: impl Into<String>,
        group: &Group,
        destinations: impl IntoIterator<Item = DestinationId>,
    ) -> Self {
        let mut unique: Vec<DestinationId> = Vec::new();
        for destination in destinations {
            if !unique.contains(&destination) {
                unique.push(destination);
            }
        }
        Self {
            id,
            title: title.into(),
            group: group.key().clone(),
            group_title: group.title().map(str::to_string),
            destinations: unique,
        }
    }

    pub fn id(&self) -> PresetId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn group(&self) -> &GroupKey {
        &self.group
    }

    pub fn destinations(&self) -> &[DestinationId] {
        &self.destinations
    }

    pub fn targets(&self, destination: &DestinationId) -> bool {
        self.destinations.contains(destination)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {}",
            self.title,
            self.group_title.as_deref().unwrap_or(UNGROUPED_TITLE)
        )
    }
}

/// Display name of the synthesized default group.
pub const UNGROUPED_TITLE: &str = "Ungrouped";

/// Display bucket of presets sharing a title suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    key: GroupKey,
    title: Option<String>,
    members: Vec<PresetId>,
}

impl Group {
    /// The default group for presets without a group suffix.
    pub fn ungrouped() -> Self {
        Self {
            key: GroupKey::ungrouped(),
            title: None,
            members: Vec::new(),
        }
    }

    /// A named group keyed by its lowercased title.
    pub fn named(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            key: GroupKey::from_title(&title),
            title: Some(title),
            members: Vec::new(),
        }
    }

    pub fn key(&self) -> &GroupKey {
        &self.key
    }

    /// Title as first seen, `None` for the default group.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Member presets in insertion order.
    pub fn members(&self) -> &[PresetId] {
        &self.members
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn add_member(&mut self, preset: PresetId) {
        self.members.push(preset);
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title.as_deref().unwrap_or(UNGROUPED_TITLE))
    }
}
