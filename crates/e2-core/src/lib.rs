//! Preset graph and preview/program state for the E2 preset controller.
//!
//! [`Presets::load`] reads a configuration export through `e2-ingest`,
//! links it into a [`PresetGraph`] and restores the persisted
//! active/preview/program pointers from `e2-persistence`. Transitions are
//! committed to the store before they are applied in memory, and every
//! committed transition notifies subscribers once.
//!
//! # Example
//!
//! ```ignore
//! use e2_core::{Presets, PresetsConfig};
//!
//! let config = PresetsConfig::new("export").with_state_path(Some("state.json".into()));
//! let mut presets = Presets::load(&config)?;
//! let id = presets.resolve_request("4")?;
//! presets.activate_preview(id)?;
//! presets.activate_program()?;
//! presets.close()?;
//! ```

mod builder;
mod config;
mod error;
mod graph;
mod notify;
mod shared;
mod state;
mod status;

pub use builder::GraphBuilder;
pub use config::PresetsConfig;
pub use error::{PresetsError, Result};
pub use graph::PresetGraph;
pub use notify::{NotificationBus, NotifyReport, SubscriberError, SubscriptionId};
pub use shared::SharedPresets;
pub use state::Presets;
pub use status::{
    DestinationSnapshot, DestinationStatus, GroupSnapshot, PresetSnapshot, PresetStatus,
    StateSnapshot,
};
