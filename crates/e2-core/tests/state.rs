//! Tests for loading an export and driving preview/program transitions.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use e2_core::{DestinationStatus, Presets, PresetsConfig, PresetsError};
use e2_ingest::SETTINGS_FILE;
use e2_model::{DestinationId, Group, GroupKey, PresetId};

use common::{Export, PRESETS};

fn id(value: u32) -> PresetId {
    PresetId::new(value).unwrap()
}

fn stage() -> DestinationId {
    DestinationId::single(3)
}

fn main_screen() -> DestinationId {
    DestinationId::new(vec![1, 2]).unwrap()
}

fn monitor() -> DestinationId {
    DestinationId::single(4)
}

fn counter(presets: &mut Presets) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let handle = Arc::clone(&count);
    presets.subscribe(move || {
        handle.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    count
}

#[test]
fn wide_preset_goes_to_preview_then_program() {
    let export = Export::standard();
    let mut presets = export.load();

    let wide = presets.preset(id(1)).expect("export id 0 becomes preset 1");
    assert_eq!(wide.title(), "Wide");
    assert_eq!(wide.group(), &GroupKey::from_title("show1"));
    assert_eq!(wide.destinations(), &[stage(), main_screen()]);
    assert_eq!(wide.to_string(), "Wide @ Show1");

    presets.activate_preview(id(1)).unwrap();
    assert_eq!(presets.active_id(), Some(id(1)));
    assert_eq!(presets.preview(&stage()).map(|p| p.id()), Some(id(1)));
    assert_eq!(presets.preview(&main_screen()).map(|p| p.id()), Some(id(1)));
    assert!(presets.program(&stage()).is_none());

    let live = presets.activate_program().unwrap();
    assert_eq!(live.id(), id(1));
    assert_eq!(presets.program(&stage()).map(|p| p.id()), Some(id(1)));
    assert_eq!(presets.program(&main_screen()).map(|p| p.id()), Some(id(1)));
    assert_eq!(presets.active_id(), Some(id(1)));
}

#[test]
fn preview_leaves_other_destinations_alone() {
    let export = Export::standard();
    let mut presets = export.load();

    presets.activate_preview(id(1)).unwrap();
    presets.activate_preview(id(2)).unwrap();
    presets.activate_preview(id(3)).unwrap();

    assert_eq!(presets.active_id(), Some(id(3)));
    assert_eq!(presets.preview(&stage()).map(|p| p.id()), Some(id(2)));
    assert_eq!(presets.preview(&main_screen()).map(|p| p.id()), Some(id(1)));
    assert_eq!(presets.preview(&monitor()).map(|p| p.id()), Some(id(3)));
}

#[test]
fn program_only_touches_the_active_presets_destinations() {
    let export = Export::standard();
    let mut presets = export.load();

    presets.activate_preview(id(1)).unwrap();
    presets.activate_program().unwrap();
    presets.activate_preview(id(2)).unwrap();
    presets.activate_program().unwrap();

    assert_eq!(presets.program(&stage()).map(|p| p.id()), Some(id(2)));
    assert_eq!(presets.program(&main_screen()).map(|p| p.id()), Some(id(1)));
    assert!(presets.program(&monitor()).is_none());
}

#[test]
fn program_without_active_preset_changes_nothing() {
    let export = Export::standard();
    let mut presets = export.load();
    let count = counter(&mut presets);
    let before = presets.snapshot();

    let err = presets.activate_program().unwrap_err();
    assert!(matches!(err, PresetsError::NoActivePreset));
    assert!(err.is_request_error());
    assert_eq!(presets.snapshot(), before);
    assert_eq!(count.load(Ordering::SeqCst), 0);
    drop(presets);

    let state = std::fs::read_to_string(export.state_path()).unwrap();
    assert!(!state.contains("program/"));
}

#[test]
fn unknown_preset_is_rejected() {
    let export = Export::standard();
    let mut presets = export.load();
    let count = counter(&mut presets);

    let err = presets.activate_preview(id(99)).unwrap_err();
    assert!(matches!(err, PresetsError::UnknownPreset(p) if p == id(99)));
    assert_eq!(presets.active_id(), None);
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn requests_are_resolved_against_the_graph() {
    let export = Export::standard();
    let presets = export.load();

    assert_eq!(presets.resolve_request("2").unwrap(), id(2));
    assert!(matches!(
        presets.resolve_request("0"),
        Err(PresetsError::InvalidRequest(_))
    ));
    assert!(matches!(
        presets.resolve_request("wide"),
        Err(PresetsError::InvalidRequest(_))
    ));
    assert!(matches!(
        presets.resolve_request("42"),
        Err(PresetsError::UnknownPreset(_))
    ));
}

#[test]
fn each_transition_notifies_once() {
    let export = Export::standard();
    let mut presets = export.load();
    let count = counter(&mut presets);

    presets.activate_preview(id(1)).unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 1);
    presets.activate_program().unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn failing_subscriber_does_not_fail_the_transition() {
    let export = Export::standard();
    let mut presets = export.load();
    presets.subscribe(|| Err("client went away".into()));
    let count = counter(&mut presets);

    presets.activate_preview(id(1)).unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(presets.active_id(), Some(id(1)));
}

#[test]
fn unsubscribed_callbacks_stop_firing() {
    let export = Export::standard();
    let mut presets = export.load();
    let count = Arc::new(AtomicUsize::new(0));
    let handle = Arc::clone(&count);
    let subscription = presets.subscribe(move || {
        handle.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    assert!(presets.unsubscribe(subscription));
    presets.activate_preview(id(1)).unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn groups_list_default_first_and_members_by_title() {
    let export = Export::standard();
    let presets = export.load();

    let groups: Vec<Option<&str>> = presets.groups().map(Group::title).collect();
    assert_eq!(groups, vec![None, Some("Show1")]);

    let show = presets.groups().nth(1).unwrap();
    let titles: Vec<&str> = presets
        .group_presets(show)
        .iter()
        .map(|p| p.title())
        .collect();
    assert_eq!(titles, vec!["Tight", "Wide"]);

    let destinations: Vec<&str> = presets.destinations().map(|d| d.title()).collect();
    assert_eq!(destinations, vec!["Main", "Stage", "Monitor"]);
}

#[test]
fn preset_status_reports_program_over_preview() {
    let export = Export::standard();
    let mut presets = export.load();
    presets.activate_preview(id(1)).unwrap();
    presets.activate_program().unwrap();
    presets.activate_preview(id(2)).unwrap();

    let wide = presets.preset_status(id(1)).unwrap();
    assert!(!wide.active);
    assert_eq!(
        wide.destinations,
        vec![
            (stage(), Some(DestinationStatus::Program)),
            (main_screen(), Some(DestinationStatus::Program)),
        ]
    );

    let tight = presets.preset_status(id(2)).unwrap();
    assert!(tight.active);
    assert!(tight.on_preview());
    assert!(!tight.on_program());
    assert!(presets.preset_status(id(99)).is_none());
}

#[test]
fn loading_twice_yields_the_same_graph() {
    let export = Export::standard();
    let config = PresetsConfig::new(export.path());
    let first = Presets::load(&config).unwrap();
    let second = Presets::load(&config).unwrap();
    assert_eq!(first.graph(), second.graph());
}

#[test]
fn duplicate_preset_across_documents_aborts_load() {
    let export = Export::new(&[("a.xml", PRESETS), ("b.xml", PRESETS)]);
    let err = Presets::load(&PresetsConfig::new(export.path())).unwrap_err();
    match err {
        PresetsError::DuplicatePreset {
            id: duplicate_id,
            first,
            duplicate,
        } => {
            assert_eq!(duplicate_id, id(1));
            assert!(first.ends_with("a.xml"));
            assert!(duplicate.ends_with("b.xml"));
        }
        other => panic!("expected duplicate preset, got {other:?}"),
    }
}

#[test]
fn duplicate_destination_in_settings_aborts_load() {
    let export = Export::with_settings(
        r#"<System><DestMgr><AuxDestCol>
            <AuxDest><OutCfgIndex>3</OutCfgIndex><Name>Stage</Name></AuxDest>
            <AuxDest><OutCfgIndex>3</OutCfgIndex><Name>Stage again</Name></AuxDest>
        </AuxDestCol></DestMgr></System>"#,
        &[],
    );
    let err = Presets::load(&PresetsConfig::new(export.path())).unwrap_err();
    match &err {
        PresetsError::DuplicateDestination {
            id: destination,
            first,
            duplicate,
        } => {
            assert_eq!(*destination, DestinationId::single(3));
            assert!(first.ends_with(SETTINGS_FILE));
            assert!(duplicate.ends_with(SETTINGS_FILE));
        }
        other => panic!("expected duplicate destination, got {other:?}"),
    }
    assert!(!err.is_request_error());
}

#[test]
fn unresolved_reference_aborts_load() {
    let export = Export::new(&[(
        "a.xml",
        r#"<PresetMgr><Preset id="0"><Name>Lost</Name>
            <AuxDestCol><AuxDest><OutCfgIndex>9</OutCfgIndex></AuxDest></AuxDestCol>
        </Preset></PresetMgr>"#,
    )]);
    let err = Presets::load(&PresetsConfig::new(export.path())).unwrap_err();
    assert!(matches!(
        &err,
        PresetsError::UnresolvedDestination { destination, .. }
            if *destination == DestinationId::single(9)
    ));
    assert!(!err.is_request_error());
}

#[test]
fn missing_export_aborts_load() {
    let dir = tempfile::tempdir().unwrap();
    let err = Presets::load(&PresetsConfig::new(dir.path().join("nowhere"))).unwrap_err();
    assert!(matches!(err, PresetsError::Ingest(_)));
}
