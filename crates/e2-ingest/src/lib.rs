//! Ingestion of E2 configuration exports.
//!
//! An export is a directory holding a settings document
//! (`settings_backup.xml`) and a `presets/` directory of preset documents.
//! The ingestor turns it into a flat stream of [`Record`]s; it knows
//! nothing about how records relate to each other.

pub mod discovery;
pub mod error;
pub mod presets;
pub mod record;
pub mod settings;
pub mod stream;
pub mod xml;

pub use discovery::{ExportLayout, PRESETS_DIR, SETTINGS_FILE, list_xml_files};
pub use error::{IngestError, Result};
pub use presets::{GROUP_SEPARATOR, PRESETS_ROOT, parse_presets, split_title};
pub use record::{DestinationRecord, PresetRecord, Record, RecordKind};
pub use settings::{SETTINGS_ROOT, parse_settings};
pub use stream::RecordStream;
pub use xml::{Element, parse_document, read_document};
