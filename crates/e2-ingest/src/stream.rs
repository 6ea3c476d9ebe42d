//! Lazy record stream over an export.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use tracing::Span;

use crate::discovery::ExportLayout;
use crate::error::Result;
use crate::presets::parse_presets;
use crate::record::Record;
use crate::settings::parse_settings;
use crate::xml::read_document;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Settings,
    Presets,
}

/// Records of an export: every destination of the settings document, then
/// the presets of each preset document.
///
/// Documents are read one at a time as the stream advances. The stream is
/// finite and cannot be restarted; after the first error it yields nothing.
#[derive(Debug)]
pub struct RecordStream {
    documents: VecDeque<(DocumentKind, PathBuf)>,
    buffered: VecDeque<Record>,
    failed: bool,
    span: Span,
}

impl RecordStream {
    /// Streams the export found in `dir`.
    pub fn open(dir: &Path) -> Result<Self> {
        Ok(Self::from_layout(ExportLayout::discover(dir)?))
    }

    pub fn from_layout(layout: ExportLayout) -> Self {
        let span = tracing::info_span!("ingest", settings = %layout.settings.display());
        let mut documents = VecDeque::with_capacity(layout.presets.len() + 1);
        documents.push_back((DocumentKind::Settings, layout.settings));
        documents.extend(
            layout
                .presets
                .into_iter()
                .map(|path| (DocumentKind::Presets, path)),
        );
        Self {
            documents,
            buffered: VecDeque::new(),
            failed: false,
            span,
        }
    }

    fn load_next_document(&mut self) -> Option<Result<()>> {
        let (kind, path) = self.documents.pop_front()?;
        let _guard = self.span.enter();
        let loaded = read_document(&path).and_then(|root| match kind {
            DocumentKind::Settings => parse_settings(&root, &path)
                .map(|records| records.into_iter().map(Record::from).collect::<Vec<_>>()),
            DocumentKind::Presets => parse_presets(&root, &path)
                .map(|records| records.into_iter().map(Record::from).collect::<Vec<_>>()),
        });
        Some(loaded.map(|records| {
            tracing::info!(
                path = %path.display(),
                records = records.len(),
                "loaded {:?} document",
                kind
            );
            self.buffered.extend(records);
        }))
    }
}

impl Iterator for RecordStream {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if let Some(record) = self.buffered.pop_front() {
                return Some(Ok(record));
            }
            match self.load_next_document()? {
                Ok(()) => continue,
                Err(error) => {
                    self.failed = true;
                    self.documents.clear();
                    return Some(Err(error));
                }
            }
        }
    }
}

impl std::iter::FusedIterator for RecordStream {}
