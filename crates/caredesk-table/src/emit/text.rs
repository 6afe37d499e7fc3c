//! Terminal rendering through `comfy-table`.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{NOTHING, UTF8_FULL, UTF8_FULL_CONDENSED, UTF8_HORIZONTAL_ONLY};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table,
    Width as ComfyWidth,
};

use crate::column::{Align, Width};
use crate::node::{CellContent, Node, Tone};
use crate::pagination::PaginationControl;
use crate::rows::RowUnit;
use crate::table::RenderedTable;

pub const DEFAULT_TEXT_WIDTH: u16 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextOptions {
    /// Total width available to the table.
    pub width: u16,
    /// Emit ANSI styling (header colors, badge tones, dimmed stripes).
    pub styled: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_TEXT_WIDTH,
            styled: false,
        }
    }
}

/// Render the table as box-drawn text.
///
/// Terminals have no column spans, so the empty-state message sits in the
/// first cell and the remaining cells stay blank.
pub fn to_text(table: &RenderedTable, options: &TextOptions) -> String {
    let mut out = Table::new();
    apply_text_style(&mut out, table, options);

    if !table.header.is_empty() {
        out.set_header(
            table
                .header
                .iter()
                .map(|cell| header_cell(&cell.title))
                .collect::<Vec<_>>(),
        );
    }

    for row in &table.body {
        match row {
            RowUnit::Data { index, cells, .. } => {
                let dim = table.flags.striped && index % 2 == 1;
                out.add_row(
                    cells
                        .iter()
                        .map(|cell| {
                            let cell = content_cell(&cell.content);
                            if dim { cell.fg(Color::DarkGrey) } else { cell }
                        })
                        .collect::<Vec<_>>(),
                );
            }
            RowUnit::Empty { message, span } => {
                let mut cells = vec![Cell::new(message).add_attribute(Attribute::Italic)];
                cells.extend((1..*span).map(|_| Cell::new("")));
                out.add_row(cells);
            }
        }
    }

    for (index, cell) in table.header.iter().enumerate() {
        align_column(&mut out, index, cell.align);
    }
    apply_width_hints(&mut out, table, options.width);

    out.to_string()
}

/// Render the table with the pagination label underneath.
pub fn to_text_with_pagination(
    table: &RenderedTable,
    pagination: Option<&PaginationControl>,
    options: &TextOptions,
) -> String {
    let mut text = to_text(table, options);
    if let Some(control) = pagination {
        text.push('\n');
        text.push_str(&control.label());
    }
    text
}

fn apply_text_style(out: &mut Table, table: &RenderedTable, options: &TextOptions) {
    let flags = table.flags;
    match (flags.bordered, flags.compact) {
        (true, false) => {
            out.load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .apply_modifier(UTF8_SOLID_INNER_BORDERS);
        }
        (true, true) => {
            out.load_preset(UTF8_FULL_CONDENSED)
                .apply_modifier(UTF8_ROUND_CORNERS);
        }
        (false, false) => {
            out.load_preset(UTF8_HORIZONTAL_ONLY);
        }
        (false, true) => {
            out.load_preset(NOTHING);
        }
    }
    out.set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(options.width);
    if options.styled {
        out.enforce_styling();
    } else {
        out.force_no_tty();
    }
}

/// Width hints become fixed widths that together fit in `width`.
///
/// Percentages are of the space left after borders. When the hints ask for
/// more than that, every hinted column shrinks proportionally.
fn apply_width_hints(out: &mut Table, table: &RenderedTable, width: u16) {
    if table.header.iter().all(|cell| cell.width == Width::Auto) {
        return;
    }
    let borders = u64::try_from(table.header.len()).unwrap_or(u64::MAX).saturating_add(1);
    let budget = u64::from(width).saturating_sub(borders).max(1);
    let wanted: Vec<Option<u64>> = table
        .header
        .iter()
        .map(|cell| match cell.width {
            Width::Auto => None,
            Width::Fixed(chars) => Some(u64::from(chars).clamp(1, budget)),
            Width::Percent(pct) => Some((budget * u64::from(pct) / 100).max(1)),
        })
        .collect();
    let total: u64 = wanted.iter().flatten().sum();

    for (index, chars) in wanted.into_iter().enumerate() {
        let Some(chars) = chars else { continue };
        let chars = if total > budget {
            (chars * budget / total).max(1)
        } else {
            chars
        };
        if let Some(column) = out.column_mut(index) {
            column.set_constraint(ColumnConstraint::Absolute(ComfyWidth::Fixed(
                u16::try_from(chars).unwrap_or(u16::MAX),
            )));
        }
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn content_cell(content: &CellContent) -> Cell {
    match content {
        CellContent::Node(Node::Badge { text, tone }) => {
            let cell = Cell::new(text);
            match tone {
                Tone::Success => cell.fg(Color::Green),
                Tone::Warning => cell.fg(Color::Yellow),
                Tone::Danger => cell.fg(Color::Red),
                Tone::Neutral => cell,
            }
        }
        other => Cell::new(other.plain_text()),
    }
}

fn align_column(table: &mut Table, index: usize, align: Align) {
    let alignment = match align {
        Align::Left => CellAlignment::Left,
        Align::Center => CellAlignment::Center,
        Align::Right => CellAlignment::Right,
    };
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
