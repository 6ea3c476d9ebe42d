//! Destinations from the settings document.
//!
//! ```text
//! <System>
//!   <DestMgr>
//!     <AuxDestCol><AuxDest><OutCfgIndex/><Name/></AuxDest>...</AuxDestCol>
//!     <ScreenDestCol>
//!       <ScreenDest>
//!         <DestOutMapCol><DestOutMap><OutCfgIndex/></DestOutMap>...</DestOutMapCol>
//!         <Name/>
//!       </ScreenDest>
//!     </ScreenDestCol>
//!   </DestMgr>
//! </System>
//! ```

use std::path::Path;

use e2_model::{DestinationId, DestinationKind};

use crate::error::{IngestError, Result};
use crate::record::DestinationRecord;
use crate::xml::Element;

pub const SETTINGS_ROOT: &str = "System";
const DEST_MGR: &str = "DestMgr";
pub(crate) const AUX_DEST_COL: &str = "AuxDestCol";
pub(crate) const AUX_DEST: &str = "AuxDest";
pub(crate) const SCREEN_DEST_COL: &str = "ScreenDestCol";
pub(crate) const SCREEN_DEST: &str = "ScreenDest";
const DEST_OUT_MAP_COL: &str = "DestOutMapCol";
const DEST_OUT_MAP: &str = "DestOutMap";
const OUT_CFG_INDEX: &str = "OutCfgIndex";
const NAME: &str = "Name";

/// Reads every destination of a `<System>` document, in document order.
pub fn parse_settings(root: &Element, source: &Path) -> Result<Vec<DestinationRecord>> {
    if root.name() != SETTINGS_ROOT {
        return Err(IngestError::UnexpectedRoot {
            path: source.to_path_buf(),
            expected: SETTINGS_ROOT,
            found: root.name().to_string(),
        });
    }

    let dest_mgr = root.require_child(DEST_MGR, source)?;
    let mut records = Vec::new();

    for collection in dest_mgr.children() {
        match collection.name() {
            AUX_DEST_COL => {
                for dest in collection.children_named(AUX_DEST) {
                    records.push(DestinationRecord {
                        id: aux_identity(dest, source)?,
                        kind: DestinationKind::Aux,
                        title: dest.require_child(NAME, source)?.text().to_string(),
                        source: source.to_path_buf(),
                    });
                }
            }
            SCREEN_DEST_COL => {
                for dest in collection.children_named(SCREEN_DEST) {
                    records.push(DestinationRecord {
                        id: screen_identity(dest, source)?,
                        kind: DestinationKind::Screen,
                        title: dest.require_child(NAME, source)?.text().to_string(),
                        source: source.to_path_buf(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(records)
}

/// Identity of an `<AuxDest>`: its single output-config index.
pub(crate) fn aux_identity(dest: &Element, source: &Path) -> Result<DestinationId> {
    Ok(DestinationId::single(dest.require_u32(OUT_CFG_INDEX, source)?))
}

/// Identity of a `<ScreenDest>`: every output-config index of its output
/// maps, collection by collection, in document order. Not sorted.
pub(crate) fn screen_identity(dest: &Element, source: &Path) -> Result<DestinationId> {
    let mut outputs = Vec::new();
    for collection in dest.children_named(DEST_OUT_MAP_COL) {
        for map in collection.children_named(DEST_OUT_MAP) {
            outputs.push(map.require_u32(OUT_CFG_INDEX, source)?);
        }
    }
    DestinationId::new(outputs).map_err(|_| IngestError::EmptyScreen {
        path: source.to_path_buf(),
        element: dest.path().to_string(),
    })
}
