//! Subcommand implementations. Each renders its output as a string.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use comfy_table::{Cell, CellAlignment, Table};
use tracing::info_span;

use e2_core::{DestinationStatus, Presets, PresetsConfig};
use e2_model::{Destination, DestinationKind, Group, Preset, PresetId, UNGROUPED_TITLE};

use crate::cli::Command;
use crate::tables::{apply_table_style, dim_cell, header_cell, preview_cell, program_cell};

/// Builds the load configuration from the global flags.
pub fn presets_config(xml_dir: Option<PathBuf>, state_db: Option<PathBuf>) -> Result<PresetsConfig> {
    let xml_dir = xml_dir.ok_or_else(|| {
        anyhow!("no export directory: pass --xml-dir or set E2_PRESETS_XML")
    })?;
    Ok(PresetsConfig::new(xml_dir).with_state_path(state_db))
}

pub fn load_presets(config: &PresetsConfig) -> Result<Presets> {
    Presets::load(config)
        .with_context(|| format!("load configuration from {}", config.xml_dir.display()))
}

pub fn run(command: &Command, presets: &mut Presets) -> Result<String> {
    match command {
        Command::Groups => Ok(run_groups(presets)),
        Command::Destinations => Ok(run_destinations(presets)),
        Command::Status { json: true } => {
            serde_json::to_string_pretty(&presets.snapshot()).context("serialize state")
        }
        Command::Status { json: false } => Ok(run_status(presets)),
        Command::Preview { preset } => run_preview(presets, preset),
        Command::Program => run_program(presets),
    }
}

pub fn run_groups(presets: &Presets) -> String {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Group"), header_cell("Presets")]);
    apply_table_style(&mut table);
    for group in presets.groups() {
        let members = presets.group_presets(group);
        if members.is_empty() {
            continue;
        }
        let listing = members
            .iter()
            .map(|preset| format!("{:>3}  {}", preset.id(), preset.title()))
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![Cell::new(group), Cell::new(listing)]);
    }
    table.to_string()
}

pub fn run_destinations(presets: &Presets) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Outputs"),
        header_cell("Kind"),
        header_cell("Title"),
        header_cell("Preview"),
        header_cell("Program"),
    ]);
    apply_table_style(&mut table);
    for destination in presets.destinations() {
        table.add_row(vec![
            Cell::new(destination.id()),
            Cell::new(kind_label(destination)),
            Cell::new(destination.title()),
            match presets.preview(destination.id()) {
                Some(preset) => preview_cell(preset_label(preset)),
                None => dim_cell("-"),
            },
            match presets.program(destination.id()) {
                Some(preset) => program_cell(preset_label(preset)),
                None => dim_cell("-"),
            },
        ]);
    }
    table.to_string()
}

pub fn run_status(presets: &Presets) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Preset"),
        header_cell("Title"),
        header_cell("Group"),
        header_cell("Destinations"),
        header_cell("State"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    for preset in presets.presets() {
        let Some(status) = presets.preset_status(preset.id()) else {
            continue;
        };
        let group = presets
            .graph()
            .group(preset.group())
            .and_then(Group::title)
            .unwrap_or(UNGROUPED_TITLE);
        let destinations = status
            .destinations
            .iter()
            .map(|(id, state)| match state {
                Some(DestinationStatus::Program) => format!("{id} (program)"),
                Some(DestinationStatus::Preview) => format!("{id} (preview)"),
                None => id.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n");

        let state = if status.on_program() {
            program_cell(state_label(status.active, "program"))
        } else if status.on_preview() {
            preview_cell(state_label(status.active, "preview"))
        } else if status.active {
            Cell::new("active")
        } else {
            dim_cell("-")
        };

        table.add_row(vec![
            Cell::new(preset.id()),
            Cell::new(preset.title()),
            Cell::new(group),
            Cell::new(destinations),
            state,
        ]);
    }
    table.to_string()
}

fn run_preview(presets: &mut Presets, request: &str) -> Result<String> {
    let span = info_span!("preview", request);
    let _guard = span.enter();
    let id = presets.resolve_request(request)?;
    presets.activate_preview(id)?;
    let preset = presets
        .preset(id)
        .ok_or_else(|| anyhow!("preset {id} vanished after preview"))?;
    Ok(transition_summary("Preview", preset, presets))
}

fn run_program(presets: &mut Presets) -> Result<String> {
    let span = info_span!("program");
    let _guard = span.enter();
    let id: PresetId = presets.activate_program()?.id();
    let preset = presets
        .preset(id)
        .ok_or_else(|| anyhow!("preset {id} vanished after program"))?;
    Ok(transition_summary("Program", preset, presets))
}

fn transition_summary(label: &str, preset: &Preset, presets: &Presets) -> String {
    let mut out = format!("{label}: {} ({})", preset, preset.id());
    for destination in presets.graph().preset_destinations(preset) {
        out.push_str(&format!("\n  {} [{}]", destination.title(), destination.id()));
    }
    out
}

fn kind_label(destination: &Destination) -> &'static str {
    match destination.kind() {
        DestinationKind::Aux => "aux",
        DestinationKind::Screen => "screen",
    }
}

fn preset_label(preset: &Preset) -> String {
    format!("{} {}", preset.id(), preset.title())
}

fn state_label(active: bool, state: &str) -> String {
    if active {
        format!("active, {state}")
    } else {
        state.to_string()
    }
}
