//! The preview/program state machine.
//!
//! One global *active* preset plus, per destination, the preset on
//! *preview* and the preset on *program*:
//!
//! - [`Presets::activate_preview`] makes a preset active and stages it on
//!   its destinations.
//! - [`Presets::activate_program`] takes the active preset live on its
//!   destinations.
//!
//! Each transition commits all of its persisted keys as one batch before
//! memory changes, then notifies subscribers once. A failed commit leaves
//! memory and store as they were.

use e2_ingest::RecordStream;
use e2_model::{Destination, DestinationId, Group, Preset, PresetId};
use e2_persistence::{PersistenceError, StateBatch, StateCodec, StateKey, StateStore};
use tracing::Span;

use crate::config::PresetsConfig;
use crate::error::{PresetsError, Result};
use crate::graph::PresetGraph;
use crate::notify::{NotificationBus, NotifyReport, SubscriberError, SubscriptionId};
use crate::status::{
    DestinationSnapshot, DestinationStatus, GroupSnapshot, PresetSnapshot, PresetStatus,
    StateSnapshot,
};

const ACTIVE: &str = "active";
const PREVIEW: &str = "preview";
const PROGRAM: &str = "program";

fn active_key() -> StateKey {
    StateKey::new(ACTIVE)
}

fn preview_key(destination: &DestinationId) -> StateKey {
    StateKey::new(PREVIEW).with(destination)
}

fn program_key(destination: &DestinationId) -> StateKey {
    StateKey::new(PROGRAM).with(destination)
}

/// Stores a preset as its decimal identity and resolves it back through
/// the graph.
struct PresetCodec<'g> {
    graph: &'g PresetGraph,
}

impl StateCodec for PresetCodec<'_> {
    type Value = PresetId;

    fn encode(&self, value: &PresetId) -> String {
        value.to_string()
    }

    fn decode(&self, raw: &str) -> std::result::Result<PresetId, String> {
        let id: PresetId = raw.parse().map_err(|e| format!("{e}"))?;
        match self.graph.preset(id) {
            Some(_) => Ok(id),
            None => Err(format!("preset {id} is not in the configuration")),
        }
    }
}

/// Which per-destination pointer a transition moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Projection {
    Preview,
    Program,
}

/// The loaded preset graph and its live state.
///
/// Transitions take `&mut self`, so a single owner serializes them; share
/// across threads with [`crate::SharedPresets`].
#[derive(Debug)]
pub struct Presets {
    graph: PresetGraph,
    active: Option<PresetId>,
    store: Option<StateStore>,
    bus: NotificationBus,
    span: Span,
}

impl Presets {
    /// Ingests the export, builds the graph, opens the store and restores
    /// the persisted state.
    pub fn load(config: &PresetsConfig) -> Result<Self> {
        let span = tracing::info_span!("load", xml_dir = %config.xml_dir.display());
        let _guard = span.enter();

        let graph = PresetGraph::from_records(RecordStream::open(&config.xml_dir)?)?;
        tracing::info!(
            destinations = graph.destination_count(),
            presets = graph.len(),
            "loaded configuration"
        );

        let store = config
            .state_path()
            .map(StateStore::open)
            .transpose()?;
        Self::new(graph, store)
    }

    /// Wraps a graph, restoring pointers from `store` when one is given.
    pub fn new(graph: PresetGraph, store: Option<StateStore>) -> Result<Self> {
        let span = tracing::info_span!("presets", persistent = store.is_some());
        let mut presets = Self {
            graph,
            active: None,
            store,
            bus: NotificationBus::new(),
            span,
        };
        presets.hydrate()?;
        Ok(presets)
    }

    fn hydrate(&mut self) -> Result<()> {
        let _guard = self.span.enter();
        let Some(store) = &self.store else {
            return Ok(());
        };
        let codec = PresetCodec { graph: &self.graph };

        let active = read_pointer(store, &active_key(), &codec)?;
        let mut pointers = Vec::with_capacity(self.graph.destination_count());
        for destination in self.graph.destinations() {
            let id = destination.id();
            pointers.push((
                id.clone(),
                read_pointer(store, &preview_key(id), &codec)?,
                read_pointer(store, &program_key(id), &codec)?,
            ));
        }

        self.active = active;
        for (id, preview, program) in pointers {
            if let Some(destination) = self.graph.destination_mut(&id) {
                destination.set_preview(preview);
                destination.set_program(program);
            }
        }
        tracing::info!(active = ?self.active, "restored state");
        Ok(())
    }

    // === Transitions ===

    /// Makes `id` the active preset and stages it on each of its
    /// destinations. Program pointers and other destinations are left
    /// alone.
    pub fn activate_preview(&mut self, id: PresetId) -> Result<&Preset> {
        let span = self.span.clone();
        let _guard = span.enter();

        let targets = self.targets(id)?;
        let mut writes = vec![(active_key(), id)];
        writes.extend(targets.iter().map(|d| (preview_key(d), id)));
        self.persist(&writes)?;

        self.active = Some(id);
        self.apply(Projection::Preview, id, &targets);
        self.bus.notify();
        self.preset(id).ok_or(PresetsError::UnknownPreset(id))
    }

    /// Takes the active preset live on each of its destinations.
    ///
    /// Fails with [`PresetsError::NoActivePreset`] before touching anything
    /// when no preset has been previewed.
    pub fn activate_program(&mut self) -> Result<&Preset> {
        let span = self.span.clone();
        let _guard = span.enter();

        let id = self.active.ok_or(PresetsError::NoActivePreset)?;
        let targets = self.targets(id)?;
        let writes: Vec<(StateKey, PresetId)> =
            targets.iter().map(|d| (program_key(d), id)).collect();
        self.persist(&writes)?;

        self.apply(Projection::Program, id, &targets);
        self.bus.notify();
        self.preset(id).ok_or(PresetsError::UnknownPreset(id))
    }

    /// Parses a caller-supplied preset identity and checks it exists.
    pub fn resolve_request(&self, raw: &str) -> Result<PresetId> {
        let id: PresetId = raw
            .parse()
            .map_err(|e| PresetsError::InvalidRequest(format!("preset={raw:?}: {e}")))?;
        self.graph
            .preset(id)
            .map(Preset::id)
            .ok_or(PresetsError::UnknownPreset(id))
    }

    fn targets(&self, id: PresetId) -> Result<Vec<DestinationId>> {
        self.graph
            .preset(id)
            .map(|preset| preset.destinations().to_vec())
            .ok_or(PresetsError::UnknownPreset(id))
    }

    fn persist(&mut self, writes: &[(StateKey, PresetId)]) -> Result<()> {
        let Some(store) = self.store.as_mut() else {
            return Ok(());
        };
        let codec = PresetCodec { graph: &self.graph };
        let mut batch = StateBatch::new();
        for (key, preset) in writes {
            batch.set(key, preset, &codec);
        }
        store.commit(batch)?;
        Ok(())
    }

    fn apply(&mut self, projection: Projection, id: PresetId, targets: &[DestinationId]) {
        for target in targets {
            let Some(destination) = self.graph.destination_mut(target) else {
                continue;
            };
            match projection {
                Projection::Preview => {
                    tracing::info!(
                        destination = %destination,
                        from = ?destination.preview(),
                        to = %id,
                        "preview"
                    );
                    destination.set_preview(Some(id));
                }
                Projection::Program => {
                    tracing::info!(
                        destination = %destination,
                        from = ?destination.program(),
                        to = %id,
                        "program"
                    );
                    destination.set_program(Some(id));
                }
            }
        }
    }

    // === Notification ===

    /// Registers a callback run after every committed transition.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut() -> std::result::Result<(), SubscriberError> + Send + 'static,
    {
        self.bus.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Runs every subscriber now, outside of any transition.
    pub fn notify(&mut self) -> NotifyReport {
        self.bus.notify()
    }

    // === Queries ===

    pub fn graph(&self) -> &PresetGraph {
        &self.graph
    }

    /// The preset most recently previewed.
    pub fn active(&self) -> Option<&Preset> {
        self.active.and_then(|id| self.graph.preset(id))
    }

    pub fn active_id(&self) -> Option<PresetId> {
        self.active
    }

    pub fn preview(&self, destination: &DestinationId) -> Option<&Preset> {
        self.graph
            .destination(destination)
            .and_then(Destination::preview)
            .and_then(|id| self.graph.preset(id))
    }

    pub fn program(&self, destination: &DestinationId) -> Option<&Preset> {
        self.graph
            .destination(destination)
            .and_then(Destination::program)
            .and_then(|id| self.graph.preset(id))
    }

    /// Groups with the default group first, then by normalized title.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.graph.groups()
    }

    pub fn group_presets(&self, group: &Group) -> Vec<&Preset> {
        self.graph.group_presets(group)
    }

    /// Destinations ordered by identity.
    pub fn destinations(&self) -> impl Iterator<Item = &Destination> {
        self.graph.destinations()
    }

    /// Presets ordered by identity.
    pub fn presets(&self) -> impl Iterator<Item = &Preset> {
        self.graph.presets()
    }

    pub fn preset(&self, id: PresetId) -> Option<&Preset> {
        self.graph.preset(id)
    }

    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// Where `id` currently is on each of its destinations.
    pub fn preset_status(&self, id: PresetId) -> Option<PresetStatus> {
        let preset = self.graph.preset(id)?;
        let destinations = self
            .graph
            .preset_destinations(preset)
            .map(|destination| {
                let status = if destination.program() == Some(id) {
                    Some(DestinationStatus::Program)
                } else if destination.preview() == Some(id) {
                    Some(DestinationStatus::Preview)
                } else {
                    None
                };
                (destination.id().clone(), status)
            })
            .collect();
        Some(PresetStatus {
            preset: id,
            active: self.active == Some(id),
            destinations,
        })
    }

    /// Serializable view of the whole state.
    pub fn snapshot(&self) -> StateSnapshot {
        let groups = self
            .graph
            .groups()
            .map(|group| GroupSnapshot {
                title: group.title().map(str::to_string),
                presets: self
                    .graph
                    .group_presets(group)
                    .iter()
                    .map(|preset| preset.id())
                    .collect(),
            })
            .collect();

        let destinations = self
            .graph
            .destinations()
            .map(|destination| DestinationSnapshot {
                outputs: destination.id().clone(),
                title: destination.title().to_string(),
                preview: destination.preview(),
                program: destination.program(),
            })
            .collect();

        let presets = self
            .graph
            .presets()
            .filter_map(|preset| {
                let status = self.preset_status(preset.id())?;
                let group = self
                    .graph
                    .group(preset.group())
                    .and_then(Group::title)
                    .map(str::to_string);
                Some(PresetSnapshot {
                    preset: preset.id(),
                    title: preset.title().to_string(),
                    group,
                    destinations: preset.destinations().to_vec(),
                    active: status.active,
                    preview: status.on_preview(),
                    program: status.on_program(),
                })
            })
            .collect();

        StateSnapshot {
            active: self.active,
            groups,
            destinations,
            presets,
        }
    }

    // === Shutdown ===

    /// Closes the state store.
    pub fn close(mut self) -> Result<()> {
        let _guard = self.span.enter();
        if let Some(store) = self.store.as_mut() {
            store.close()?;
        }
        Ok(())
    }
}

/// Reads one pointer; stale or unreadable values count as unset.
fn read_pointer(
    store: &StateStore,
    key: &StateKey,
    codec: &PresetCodec<'_>,
) -> Result<Option<PresetId>> {
    match store.get(key, codec) {
        Ok(value) => Ok(value),
        Err(PersistenceError::Decode { key, value, reason }) => {
            tracing::warn!(%key, %value, %reason, "ignoring stored preset");
            Ok(None)
        }
        Err(error) => Err(error.into()),
    }
}
