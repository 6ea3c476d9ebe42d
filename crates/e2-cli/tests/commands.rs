//! Tests for argument parsing and subcommand output.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use e2_cli::cli::{Cli, Command};
use e2_cli::commands::{load_presets, presets_config, run};
use e2_core::PresetsError;
use e2_ingest::{PRESETS_DIR, SETTINGS_FILE};
use tempfile::TempDir;

const SETTINGS: &str = r#"<System><DestMgr>
  <AuxDestCol><AuxDest><OutCfgIndex>3</OutCfgIndex><Name>Stage</Name></AuxDest></AuxDestCol>
  <ScreenDestCol><ScreenDest>
    <DestOutMapCol>
      <DestOutMap><OutCfgIndex>1</OutCfgIndex></DestOutMap>
      <DestOutMap><OutCfgIndex>2</OutCfgIndex></DestOutMap>
    </DestOutMapCol>
    <Name>Main</Name>
  </ScreenDest></ScreenDestCol>
</DestMgr></System>"#;

const PRESETS: &str = r#"<PresetMgr>
  <Preset id="0"><Name>Wide @ Show1</Name>
    <AuxDestCol><AuxDest><OutCfgIndex>3</OutCfgIndex></AuxDest></AuxDestCol>
    <ScreenDestCol><ScreenDest><DestOutMapCol>
      <DestOutMap><OutCfgIndex>1</OutCfgIndex></DestOutMap>
      <DestOutMap><OutCfgIndex>2</OutCfgIndex></DestOutMap>
    </DestOutMapCol></ScreenDest></ScreenDestCol>
  </Preset>
  <Preset id="1"><Name>Black</Name></Preset>
</PresetMgr>"#;

fn export() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(SETTINGS_FILE), SETTINGS).unwrap();
    fs::create_dir(dir.path().join(PRESETS_DIR)).unwrap();
    fs::write(dir.path().join(PRESETS_DIR).join("show.xml"), PRESETS).unwrap();
    dir
}

fn invoke(dir: &TempDir, args: &[&str]) -> anyhow::Result<String> {
    let state = dir.path().join("state.json");
    let mut argv = vec![
        "e2-presets",
        "--xml-dir",
        dir.path().to_str().unwrap(),
        "--state-db",
        state.to_str().unwrap(),
    ];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv)?;
    let config = presets_config(cli.xml_dir, cli.state_db)?;
    let mut presets = load_presets(&config)?;
    let output = run(&cli.command, &mut presets)?;
    presets.close()?;
    Ok(output)
}

#[test]
fn parses_subcommands_and_global_flags() {
    let cli = Cli::try_parse_from(["e2-presets", "preview", "4", "--xml-dir", "/srv/e2"]).unwrap();
    assert_eq!(
        cli.command,
        Command::Preview {
            preset: "4".to_string()
        }
    );
    assert_eq!(cli.xml_dir, Some(PathBuf::from("/srv/e2")));

    let cli = Cli::try_parse_from(["e2-presets", "status", "--json"]).unwrap();
    assert_eq!(cli.command, Command::Status { json: true });
}

#[test]
fn missing_export_directory_is_reported() {
    let err = presets_config(None, None).unwrap_err();
    assert!(err.to_string().contains("--xml-dir"));
}

#[test]
fn preview_then_program_across_invocations() {
    let dir = export();

    let preview = invoke(&dir, &["preview", "1"]).unwrap();
    assert!(preview.starts_with("Preview: Wide @ Show1 (1)"), "{preview}");
    assert!(preview.contains("Main [1,2]"), "{preview}");

    let program = invoke(&dir, &["program"]).unwrap();
    assert!(program.starts_with("Program: Wide @ Show1 (1)"), "{program}");

    let json = invoke(&dir, &["status", "--json"]).unwrap();
    let state: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(state["active"], 1);
    assert_eq!(state["destinations"][0]["outputs"], serde_json::json!([1, 2]));
    assert_eq!(state["destinations"][0]["program"], 1);
    assert_eq!(state["presets"][1]["title"], "Black");
    assert_eq!(state["presets"][1]["program"], false);
}

#[test]
fn tables_list_groups_and_destinations() {
    let dir = export();
    invoke(&dir, &["preview", "2"]).unwrap();

    let groups = invoke(&dir, &["groups"]).unwrap();
    assert!(groups.contains("Ungrouped"), "{groups}");
    assert!(groups.contains("Show1"), "{groups}");
    assert!(groups.contains("Wide"), "{groups}");

    let destinations = invoke(&dir, &["destinations"]).unwrap();
    assert!(destinations.contains("Stage"), "{destinations}");
    assert!(destinations.contains("screen"), "{destinations}");

    let status = invoke(&dir, &["status"]).unwrap();
    assert!(status.contains("active"), "{status}");
}

#[test]
fn rejected_requests_surface_as_preset_errors() {
    let dir = export();

    let err = invoke(&dir, &["program"]).unwrap_err();
    let preset_error = err.downcast_ref::<PresetsError>().unwrap();
    assert!(matches!(preset_error, PresetsError::NoActivePreset));

    let err = invoke(&dir, &["preview", "nine"]).unwrap_err();
    assert!(err.downcast_ref::<PresetsError>().unwrap().is_request_error());

    let err = invoke(&dir, &["preview", "9"]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PresetsError>(),
        Some(PresetsError::UnknownPreset(_))
    ));
}
