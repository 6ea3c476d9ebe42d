//! Persistence error types.
//!
//! All persistence operations return structured errors that provide
//! user-friendly messages and optional remediation hints.

use std::path::PathBuf;
use thiserror::Error;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid file format (not a state file).
    #[error("Invalid state file format: {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    /// Unsupported schema version.
    #[error("State file version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion {
        found: u32,
        max_supported: u32,
        path: PathBuf,
    },

    /// Serialization error.
    #[error("Failed to serialize state")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Deserialization error.
    #[error("Failed to deserialize state file: {path}")]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stored value could not be decoded by the caller's codec.
    #[error("Cannot decode value {value:?} stored at {key}: {reason}")]
    Decode {
        key: String,
        value: String,
        reason: String,
    },

    /// The store was already closed.
    #[error("State store is closed")]
    Closed,
}

impl PersistenceError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::InvalidFormat { path, reason } => {
                format!(
                    "The file at {} is not a valid preset state file: {}",
                    path.display(),
                    reason
                )
            }
            Self::UnsupportedVersion {
                found,
                max_supported,
                ..
            } => {
                format!(
                    "This state file was written by a newer version \
                    (file version {}, this version supports up to {}).",
                    found, max_supported
                )
            }
            Self::Serialization { .. } => "An error occurred while saving the preset state.".into(),
            Self::Deserialization { path, .. } => {
                format!(
                    "The preset state at {} could not be read. The file may be corrupted.",
                    path.display()
                )
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the preset state to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
            Self::Decode { key, .. } => {
                format!("The saved value for {key} no longer matches the configuration.")
            }
            Self::Closed => "The preset state store has already been closed.".into(),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::InvalidFormat { .. } | Self::Deserialization { .. } => {
                Some("Move the state file aside to start with empty preview/program state.".into())
            }
            Self::UnsupportedVersion { .. } => Some("Upgrade to the latest release.".into()),
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or choose a different state file location.".into())
            }
            Self::Serialization { .. } | Self::Decode { .. } | Self::Closed => None,
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
