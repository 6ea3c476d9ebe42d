//! Terminal table styling.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

pub(crate) fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub(crate) fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

pub(crate) fn program_cell(text: String) -> Cell {
    Cell::new(text).fg(Color::Red).add_attribute(Attribute::Bold)
}

pub(crate) fn preview_cell(text: String) -> Cell {
    Cell::new(text).fg(Color::Green)
}

pub(crate) fn dim_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Dim)
}
