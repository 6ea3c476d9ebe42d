//! Presets from the preset documents.
//!
//! ```text
//! <PresetMgr>
//!   <Preset id="0">
//!     <Name>Wide @ Show1</Name>
//!     <AuxDestCol><AuxDest><OutCfgIndex/></AuxDest></AuxDestCol>
//!     <ScreenDestCol><ScreenDest><DestOutMapCol>...</DestOutMapCol></ScreenDest></ScreenDestCol>
//!   </Preset>
//! </PresetMgr>
//! ```

use std::path::Path;

use e2_model::PresetId;

use crate::error::{IngestError, Result};
use crate::record::PresetRecord;
use crate::settings::{
    AUX_DEST, AUX_DEST_COL, SCREEN_DEST, SCREEN_DEST_COL, aux_identity, screen_identity,
};
use crate::xml::{Element, parse_u32};

pub const PRESETS_ROOT: &str = "PresetMgr";
const PRESET: &str = "Preset";
const ID: &str = "id";
const NAME: &str = "Name";

/// Separator between a preset title and its group.
pub const GROUP_SEPARATOR: char = '@';

/// Reads every preset of a `<PresetMgr>` document, in document order.
///
/// Identities are only unique within the document; the graph builder
/// checks uniqueness across documents.
pub fn parse_presets(root: &Element, source: &Path) -> Result<Vec<PresetRecord>> {
    if root.name() != PRESETS_ROOT {
        return Err(IngestError::UnexpectedRoot {
            path: source.to_path_buf(),
            expected: PRESETS_ROOT,
            found: root.name().to_string(),
        });
    }

    root.children_named(PRESET)
        .map(|preset| parse_preset(preset, source))
        .collect()
}

fn parse_preset(preset: &Element, source: &Path) -> Result<PresetRecord> {
    let raw_id = parse_u32(
        preset.require_attribute(ID, source)?,
        &format!("{}[@{ID}]", preset.path()),
        source,
    )?;
    let id = PresetId::from_export_id(raw_id).map_err(|_| IngestError::InvalidNumber {
        path: source.to_path_buf(),
        element: format!("{}[@{ID}]", preset.path()),
        value: raw_id.to_string(),
    })?;

    let (title, group) = split_title(preset.require_child(NAME, source)?.text());

    let mut destinations = Vec::new();
    for collection in preset.children() {
        match collection.name() {
            SCREEN_DEST_COL => {
                for dest in collection.children_named(SCREEN_DEST) {
                    destinations.push(screen_identity(dest, source)?);
                }
            }
            AUX_DEST_COL => {
                for dest in collection.children_named(AUX_DEST) {
                    destinations.push(aux_identity(dest, source)?);
                }
            }
            _ => {}
        }
    }

    Ok(PresetRecord {
        id,
        title,
        group,
        destinations,
        source: source.to_path_buf(),
    })
}

/// Splits `"<title> @ <group>"` at the first separator.
///
/// Both parts are trimmed; an empty group part means no group.
pub fn split_title(name: &str) -> (String, Option<String>) {
    match name.split_once(GROUP_SEPARATOR) {
        Some((title, group)) => {
            let group = group.trim();
            (
                title.trim().to_string(),
                (!group.is_empty()).then(|| group.to_string()),
            )
        }
        None => (name.trim().to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_document;
    use e2_model::DestinationId;

    fn presets(text: &str) -> Result<Vec<PresetRecord>> {
        let source = Path::new("presets/shard0.xml");
        parse_presets(&parse_document(text, source)?, source)
    }

    #[test]
    fn split_title_trims_both_parts() {
        assert_eq!(
            split_title(" Wide  @ Show1 "),
            ("Wide".to_string(), Some("Show1".to_string()))
        );
        assert_eq!(split_title("Wide"), ("Wide".to_string(), None));
        assert_eq!(split_title("Wide @ "), ("Wide".to_string(), None));
        assert_eq!(
            split_title("a@b@c"),
            ("a".to_string(), Some("b@c".to_string()))
        );
    }

    #[test]
    fn reads_preset_with_references_in_document_order() {
        let records = presets(
            r#"<PresetMgr>
                <Preset id="0">
                  <Name>Wide @ Show1</Name>
                  <AuxDestCol><AuxDest><OutCfgIndex>3</OutCfgIndex></AuxDest></AuxDestCol>
                  <ScreenDestCol><ScreenDest><DestOutMapCol>
                    <DestOutMap><OutCfgIndex>1</OutCfgIndex></DestOutMap>
                    <DestOutMap><OutCfgIndex>2</OutCfgIndex></DestOutMap>
                  </DestOutMapCol></ScreenDest></ScreenDestCol>
                </Preset>
                <Preset id="4"><Name>Tight</Name></Preset>
            </PresetMgr>"#,
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        let wide = &records[0];
        assert_eq!(wide.id.get(), 1);
        assert_eq!(wide.title, "Wide");
        assert_eq!(wide.group.as_deref(), Some("Show1"));
        assert_eq!(
            wide.destinations,
            vec![
                DestinationId::single(3),
                DestinationId::new(vec![1, 2]).unwrap()
            ]
        );
        let tight = &records[1];
        assert_eq!(tight.id.get(), 5);
        assert_eq!(tight.group, None);
        assert!(tight.destinations.is_empty());
    }

    #[test]
    fn rejects_unexpected_root() {
        let err = presets("<System/>").unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnexpectedRoot { expected: "PresetMgr", ref found, .. } if found == "System"
        ));
    }

    #[test]
    fn preset_id_must_be_a_non_negative_integer() {
        let err = presets(r#"<PresetMgr><Preset id="-1"><Name>x</Name></Preset></PresetMgr>"#)
            .unwrap_err();
        assert!(matches!(err, IngestError::InvalidNumber { ref value, .. } if value == "-1"));

        let err = presets("<PresetMgr><Preset><Name>x</Name></Preset></PresetMgr>").unwrap_err();
        assert!(matches!(
            err,
            IngestError::MissingAttribute { attribute: "id", .. }
        ));
    }

    #[test]
    fn preset_without_name_is_rejected() {
        let err = presets(r#"<PresetMgr><Preset id="1"/></PresetMgr>"#).unwrap_err();
        assert!(matches!(
            err,
            IngestError::MissingElement { ref element, .. } if element == "PresetMgr/Preset/Name"
        ));
    }
}
