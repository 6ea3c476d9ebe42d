//! Error types for configuration export ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a configuration export.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Export directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Required document not found.
    #[error("document not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a document.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === XML Errors ===
    /// The document is not well-formed XML.
    #[error("malformed XML in {path} at byte {position}: {source}")]
    Xml {
        path: PathBuf,
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// The document is well-formed but its structure is unusable.
    #[error("malformed document {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    // === Schema Errors ===
    /// Root element is not the one this document kind requires.
    #[error("unexpected root element <{found}> in {path} (expected <{expected}>)")]
    UnexpectedRoot {
        path: PathBuf,
        expected: &'static str,
        found: String,
    },

    /// Required child element is missing.
    #[error("missing element {element} in {path}")]
    MissingElement { path: PathBuf, element: String },

    /// Required attribute is missing.
    #[error("missing attribute '{attribute}' on {element} in {path}")]
    MissingAttribute {
        path: PathBuf,
        element: String,
        attribute: &'static str,
    },

    /// Element text or attribute is not a valid non-negative integer.
    #[error("invalid integer {value:?} at {element} in {path}")]
    InvalidNumber {
        path: PathBuf,
        element: String,
        value: String,
    },

    /// A screen destination without any output map entries.
    #[error("screen destination {element} in {path} has no output indices")]
    EmptyScreen { path: PathBuf, element: String },
}

impl IngestError {
    /// Document the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::DirectoryNotFound { path }
            | Self::FileNotFound { path }
            | Self::DirectoryRead { path, .. }
            | Self::FileRead { path, .. }
            | Self::Xml { path, .. }
            | Self::Malformed { path, .. }
            | Self::UnexpectedRoot { path, .. }
            | Self::MissingElement { path, .. }
            | Self::MissingAttribute { path, .. }
            | Self::InvalidNumber { path, .. }
            | Self::EmptyScreen { path, .. } => path,
        }
    }

    /// Whether the document itself is structurally wrong (as opposed to
    /// being unreadable).
    pub fn is_format_error(&self) -> bool {
        !matches!(
            self,
            Self::DirectoryNotFound { .. }
                | Self::FileNotFound { .. }
                | Self::DirectoryRead { .. }
                | Self::FileRead { .. }
        )
    }
}

/// Result type alias for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
