//! Minimal element tree over `quick-xml` events.
//!
//! Export documents are small, so each one is read into a tree first and
//! then walked by the schema-aware parsers. Every element remembers its
//! path from the root so schema errors can point at the offending element.

use std::path::{Path, PathBuf};

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};

use crate::error::{IngestError, Result};

/// One parsed XML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    path: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Slash-separated path from the document root, e.g. `System/DestMgr`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Direct children with the given tag, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// First direct child with the given tag.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Text content with surrounding whitespace removed.
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First child with the given tag, or a missing-element error.
    pub fn require_child(&self, name: &str, source: &Path) -> Result<&Element> {
        self.child(name).ok_or_else(|| IngestError::MissingElement {
            path: source.to_path_buf(),
            element: format!("{}/{}", self.path, name),
        })
    }

    /// Parses the text of the named child as a non-negative integer.
    pub fn require_u32(&self, name: &str, source: &Path) -> Result<u32> {
        let child = self.require_child(name, source)?;
        parse_u32(child.text(), &child.path, source)
    }

    pub fn require_attribute(&self, name: &'static str, source: &Path) -> Result<&str> {
        self.attribute(name)
            .ok_or_else(|| IngestError::MissingAttribute {
                path: source.to_path_buf(),
                element: self.path.clone(),
                attribute: name,
            })
    }
}

pub(crate) fn parse_u32(value: &str, element: &str, source: &Path) -> Result<u32> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| IngestError::InvalidNumber {
            path: source.to_path_buf(),
            element: element.to_string(),
            value: value.to_string(),
        })
}

/// Parses a whole document and returns its root element.
pub fn parse_document(text: &str, source: &Path) -> Result<Element> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let position = reader.buffer_position() as u64;
        let xml_error = |error: quick_xml::Error| IngestError::Xml {
            path: source.to_path_buf(),
            position,
            source: error,
        };

        match reader.read_event().map_err(xml_error)? {
            Event::Start(start) => {
                let element = open_element(&start, stack.last(), source, position)?;
                stack.push(element);
            }
            Event::Empty(start) => {
                let element = open_element(&start, stack.last(), source, position)?;
                attach(element, &mut stack, &mut root, source)?;
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| IngestError::Malformed {
                    path: source.to_path_buf(),
                    reason: format!("unbalanced end tag at byte {position}"),
                })?;
                attach(element, &mut stack, &mut root, source)?;
            }
            Event::Text(content) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&content));
                }
            }
            Event::CData(content) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&content));
                }
            }
            Event::GeneralRef(reference) => {
                let Some(current) = stack.last_mut() else {
                    continue;
                };
                if let Some(ch) = reference
                    .resolve_char_ref()
                    .map_err(|e| xml_error(quick_xml::Error::from(e)))?
                {
                    current.text.push(ch);
                    continue;
                }
                let name = String::from_utf8_lossy(&reference).into_owned();
                let resolved =
                    resolve_predefined_entity(&name).ok_or_else(|| IngestError::Malformed {
                        path: source.to_path_buf(),
                        reason: format!("unknown entity &{name}; in {}", current.path),
                    })?;
                current.text.push_str(resolved);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(IngestError::Malformed {
            path: source.to_path_buf(),
            reason: format!("element {} is not closed", open.path),
        });
    }

    root.ok_or_else(|| IngestError::Malformed {
        path: source.to_path_buf(),
        reason: "document has no root element".to_string(),
    })
}

/// Reads and parses a document from disk.
pub fn read_document(path: &Path) -> Result<Element> {
    let text = std::fs::read_to_string(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_document(&text, path)
}

fn open_element(
    start: &BytesStart<'_>,
    parent: Option<&Element>,
    source: &Path,
    position: u64,
) -> Result<Element> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let path = match parent {
        Some(parent) => format!("{}/{}", parent.path, name),
        None => name.clone(),
    };

    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| xml_failure(source, position, e.into()))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| xml_failure(source, position, quick_xml::Error::from(e)))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(Element {
        name,
        path,
        attributes,
        children: Vec::new(),
        text: String::new(),
    })
}

fn attach(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
    source: &Path,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(IngestError::Malformed {
            path: source.to_path_buf(),
            reason: format!("second root element <{}>", element.name),
        });
    }
    *root = Some(element);
    Ok(())
}

fn xml_failure(source: &Path, position: u64, error: quick_xml::Error) -> IngestError {
    IngestError::Xml {
        path: PathBuf::from(source),
        position,
        source: error,
    }
}
