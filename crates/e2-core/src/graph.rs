//! The linked destination/preset/group graph.

use std::collections::BTreeMap;

use e2_ingest::{IngestError, Record};
use e2_model::{Destination, DestinationId, Group, GroupKey, Preset, PresetId};

use crate::builder::GraphBuilder;
use crate::error::Result;

/// Destinations, presets and groups of one configuration export.
///
/// Built once at load time. Afterwards only the preview/program pointers of
/// destinations change, and only through [`crate::Presets`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetGraph {
    pub(crate) destinations: BTreeMap<DestinationId, Destination>,
    pub(crate) presets: BTreeMap<PresetId, Preset>,
    pub(crate) groups: BTreeMap<GroupKey, Group>,
}

impl PresetGraph {
    /// Builds the graph from an ingestion record stream.
    ///
    /// Any record error, duplicate identity or unresolved destination
    /// reference aborts the build.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = std::result::Result<Record, IngestError>>,
    {
        let mut builder = GraphBuilder::new();
        for record in records {
            builder.add_record(record?)?;
        }
        builder.build()
    }

    /// Destinations ordered by identity.
    pub fn destinations(&self) -> impl Iterator<Item = &Destination> {
        self.destinations.values()
    }

    pub fn destination(&self, id: &DestinationId) -> Option<&Destination> {
        self.destinations.get(id)
    }

    pub(crate) fn destination_mut(&mut self, id: &DestinationId) -> Option<&mut Destination> {
        self.destinations.get_mut(id)
    }

    /// Presets ordered by identity.
    pub fn presets(&self) -> impl Iterator<Item = &Preset> {
        self.presets.values()
    }

    pub fn preset(&self, id: PresetId) -> Option<&Preset> {
        self.presets.get(&id)
    }

    /// Groups with the default group first, then by normalized key.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    pub fn group(&self, key: &GroupKey) -> Option<&Group> {
        self.groups.get(key)
    }

    /// Members of `group` sorted by title.
    pub fn group_presets(&self, group: &Group) -> Vec<&Preset> {
        let mut presets: Vec<&Preset> = group
            .members()
            .iter()
            .filter_map(|id| self.presets.get(id))
            .collect();
        presets.sort_by(|a, b| a.title().cmp(b.title()).then(a.id().cmp(&b.id())));
        presets
    }

    /// Destinations targeted by `preset`, in the preset's order.
    pub fn preset_destinations<'a>(
        &'a self,
        preset: &'a Preset,
    ) -> impl Iterator<Item = &'a Destination> + 'a {
        preset
            .destinations()
            .iter()
            .filter_map(|id| self.destinations.get(id))
    }

    pub fn destination_count(&self) -> usize {
        self.destinations.len()
    }

    /// Number of presets.
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
