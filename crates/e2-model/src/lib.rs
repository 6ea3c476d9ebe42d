//! Data model for the E2 preset controller.
//!
//! Destinations are the switcher's outputs, presets are saved
//! configurations targeting a set of destinations, and groups are display
//! buckets of presets.

pub mod entity;
pub mod error;
pub mod ids;

pub use entity::{Destination, DestinationKind, Group, Preset, UNGROUPED_TITLE};
pub use error::{ModelError, Result};
pub use ids::{DestinationId, GroupKey, PresetId};
