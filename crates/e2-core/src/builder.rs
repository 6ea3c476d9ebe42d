//! Entity graph construction from ingestion records.

use std::collections::BTreeMap;
use std::path::PathBuf;

use e2_ingest::{DestinationRecord, PresetRecord, Record};
use e2_model::{Destination, DestinationId, Group, GroupKey, Preset, PresetId};

use crate::error::{PresetsError, Result};
use crate::graph::PresetGraph;

/// Collects records and links them into a [`PresetGraph`].
///
/// Destinations are added as they arrive. Presets are held back until
/// [`GraphBuilder::build`] so that every destination is known before any
/// preset reference is resolved.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    destinations: BTreeMap<DestinationId, (Destination, PathBuf)>,
    presets: Vec<PresetRecord>,
    preset_sources: BTreeMap<PresetId, PathBuf>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one record, rejecting duplicate identities.
    pub fn add_record(&mut self, record: Record) -> Result<()> {
        match record {
            Record::Destination(record) => self.add_destination(record),
            Record::Preset(record) => self.add_preset(record),
        }
    }

    fn add_destination(&mut self, record: DestinationRecord) -> Result<()> {
        if let Some((_, first)) = self.destinations.get(&record.id) {
            return Err(PresetsError::DuplicateDestination {
                id: record.id,
                first: first.clone(),
                duplicate: record.source,
            });
        }
        tracing::debug!(
            destination = %record.id,
            kind = ?record.kind,
            title = %record.title,
            "destination"
        );
        let destination = Destination::new(record.id.clone(), record.kind, record.title);
        self.destinations
            .insert(record.id, (destination, record.source));
        Ok(())
    }

    fn add_preset(&mut self, record: PresetRecord) -> Result<()> {
        if let Some(first) = self.preset_sources.get(&record.id) {
            return Err(PresetsError::DuplicatePreset {
                id: record.id,
                first: first.clone(),
                duplicate: record.source,
            });
        }
        self.preset_sources
            .insert(record.id, record.source.clone());
        self.presets.push(record);
        Ok(())
    }

    /// Resolves preset references and groups, producing the graph.
    pub fn build(self) -> Result<PresetGraph> {
        let destinations: BTreeMap<DestinationId, Destination> = self
            .destinations
            .into_iter()
            .map(|(id, (destination, _))| (id, destination))
            .collect();

        let mut groups = BTreeMap::new();
        groups.insert(GroupKey::ungrouped(), Group::ungrouped());
        let mut presets = BTreeMap::new();

        for record in self.presets {
            if let Some(missing) = record
                .destinations
                .iter()
                .find(|id| !destinations.contains_key(*id))
            {
                return Err(PresetsError::UnresolvedDestination {
                    preset: record.id,
                    destination: missing.clone(),
                    path: record.source,
                });
            }

            let group = match &record.group {
                Some(title) => groups
                    .entry(GroupKey::from_title(title))
                    .or_insert_with(|| {
                        tracing::info!(group = %title, "new group");
                        Group::named(title.as_str())
                    }),
                None => groups
                    .entry(GroupKey::ungrouped())
                    .or_insert_with(Group::ungrouped),
            };

            let preset = Preset::new(record.id, record.title, group, record.destinations);
            tracing::info!(
                preset = %preset.id(),
                title = %preset,
                destinations = preset.destinations().len(),
                "preset"
            );
            group.add_member(preset.id());
            presets.insert(preset.id(), preset);
        }

        Ok(PresetGraph {
            destinations,
            presets,
            groups,
        })
    }
}
