#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Identity of a destination: the output-config indices it spans.
///
/// Aux destinations carry a single index. Screen destinations carry every
/// index of their output maps in document order. The order is significant,
/// so `[1, 2]` and `[2, 1]` are different destinations.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct DestinationId(Vec<u32>);

impl DestinationId {
    pub fn new(outputs: impl Into<Vec<u32>>) -> Result<Self, ModelError> {
        let outputs = outputs.into();
        if outputs.is_empty() {
            return Err(ModelError::EmptyDestinationId);
        }
        Ok(Self(outputs))
    }

    /// Identity of a single-output (aux) destination.
    pub fn single(output: u32) -> Self {
        Self(vec![output])
    }

    pub fn outputs(&self) -> &[u32] {
        &self.0
    }

    pub fn is_composite(&self) -> bool {
        self.0.len() > 1
    }
}

impl TryFrom<Vec<u32>> for DestinationId {
    type Error = ModelError;

    fn try_from(value: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DestinationId> for Vec<u32> {
    fn from(value: DestinationId) -> Self {
        value.0
    }
}

impl fmt::Display for DestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, output) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{output}")?;
        }
        Ok(())
    }
}

impl FromStr for DestinationId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let outputs = s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<u32>()
                    .map_err(|_| ModelError::InvalidDestinationId(s.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(outputs)
    }
}

/// Identity of a preset.
///
/// Always positive: the export numbers presets from zero, and the
/// identity is that raw id plus one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct PresetId(u32);

impl PresetId {
    pub fn new(value: u32) -> Result<Self, ModelError> {
        if value == 0 {
            return Err(ModelError::InvalidPresetId(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Identity for the export's zero-based preset id.
    pub fn from_export_id(raw: u32) -> Result<Self, ModelError> {
        raw.checked_add(1)
            .map(Self)
            .ok_or_else(|| ModelError::InvalidPresetId(raw.to_string()))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for PresetId {
    type Error = ModelError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PresetId> for u32 {
    fn from(value: PresetId) -> Self {
        value.0
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PresetId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u32>()
            .map_err(|_| ModelError::InvalidPresetId(s.to_string()))?;
        Self::new(value)
    }
}

/// Lookup key of a group.
///
/// The default group has no key and sorts before every named group.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct GroupKey(Option<String>);

impl GroupKey {
    /// Key of the synthesized "ungrouped" group.
    pub fn ungrouped() -> Self {
        Self(None)
    }

    /// Normalized key for a group title; titles match case-insensitively.
    pub fn from_title(title: &str) -> Self {
        Self(Some(title.to_lowercase()))
    }

    pub fn is_ungrouped(&self) -> bool {
        self.0.is_none()
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_deref().unwrap_or(""))
    }
}
