//! Terminal tables for CLI reports.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use caredesk_table::{BUILTIN_RENDERERS, Diagnostic};

pub fn renderers_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Renderer"), header_cell("Description")]);
    apply_table_style(&mut table);
    for (name, description) in BUILTIN_RENDERERS {
        table.add_row(vec![Cell::new(name).fg(Color::Green), Cell::new(description)]);
    }
    table
}

pub fn diagnostics_table(diagnostics: &[Diagnostic]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Kind"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for diagnostic in diagnostics {
        table.add_row(vec![
            Cell::new(diagnostic.column()),
            Cell::new(diagnostic.kind()).fg(Color::Yellow),
            Cell::new(diagnostic.to_string()),
        ]);
    }
    table
}

/// Print degraded descriptors to stderr.
pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    eprintln!("{}", diagnostics_table(diagnostics));
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
