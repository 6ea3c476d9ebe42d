//! Export fixtures shared by the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use e2_core::{Presets, PresetsConfig};
use e2_ingest::{PRESETS_DIR, SETTINGS_FILE};
use tempfile::TempDir;

/// Aux destination 3 "Stage", screen destination 1,2 "Main" and aux
/// destination 4 "Monitor".
pub const SETTINGS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<System>
  <DestMgr>
    <AuxDestCol>
      <AuxDest><OutCfgIndex>3</OutCfgIndex><Name>Stage</Name></AuxDest>
      <AuxDest><OutCfgIndex>4</OutCfgIndex><Name>Monitor</Name></AuxDest>
    </AuxDestCol>
    <ScreenDestCol>
      <ScreenDest>
        <DestOutMapCol>
          <DestOutMap><OutCfgIndex>1</OutCfgIndex></DestOutMap>
          <DestOutMap><OutCfgIndex>2</OutCfgIndex></DestOutMap>
        </DestOutMapCol>
        <Name>Main</Name>
      </ScreenDest>
    </ScreenDestCol>
  </DestMgr>
</System>
"#;

/// Export ids 0..=2: "Wide @ Show1" on Stage and Main, "Tight @ show1" on
/// Stage, "Black" on Monitor.
pub const PRESETS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<PresetMgr>
  <Preset id="0">
    <Name>Wide @ Show1</Name>
    <AuxDestCol><AuxDest><OutCfgIndex>3</OutCfgIndex></AuxDest></AuxDestCol>
    <ScreenDestCol>
      <ScreenDest>
        <DestOutMapCol>
          <DestOutMap><OutCfgIndex>1</OutCfgIndex></DestOutMap>
          <DestOutMap><OutCfgIndex>2</OutCfgIndex></DestOutMap>
        </DestOutMapCol>
      </ScreenDest>
    </ScreenDestCol>
  </Preset>
  <Preset id="1">
    <Name>Tight @ show1</Name>
    <AuxDestCol><AuxDest><OutCfgIndex>3</OutCfgIndex></AuxDest></AuxDestCol>
  </Preset>
  <Preset id="2">
    <Name>Black</Name>
    <AuxDestCol><AuxDest><OutCfgIndex>4</OutCfgIndex></AuxDest></AuxDestCol>
  </Preset>
</PresetMgr>
"#;

/// A temporary export directory plus a state file path inside it.
pub struct Export {
    pub dir: TempDir,
}

impl Export {
    pub fn new(presets: &[(&str, &str)]) -> Self {
        Self::with_settings(SETTINGS, presets)
    }

    pub fn with_settings(settings: &str, presets: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(dir.path().join(SETTINGS_FILE), settings).expect("write settings");
        let preset_dir = dir.path().join(PRESETS_DIR);
        fs::create_dir(&preset_dir).expect("create presets dir");
        for (name, contents) in presets {
            fs::write(preset_dir.join(name), contents).expect("write presets");
        }
        Self { dir }
    }

    pub fn standard() -> Self {
        Self::new(&[("show.xml", PRESETS)])
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn state_path(&self) -> PathBuf {
        self.dir.path().join("state.json")
    }

    pub fn config(&self) -> PresetsConfig {
        PresetsConfig::new(self.path()).with_state_path(Some(self.state_path()))
    }

    pub fn load(&self) -> Presets {
        Presets::load(&self.config()).expect("load presets")
    }
}
