//! Per-cell value resolution.

use caredesk_model::Record;

use crate::column::Column;
use crate::node::CellContent;
use crate::renderer::RenderContext;

/// Resolve what one cell shows.
///
/// The raw value is `record[column.key]`, `None` when absent. A column with a
/// renderer passes that value, the whole record and the row index through
/// it; otherwise the raw value is returned untouched.
pub fn resolve_cell(
    column: &Column,
    record: &Record,
    row_index: usize,
    ctx: &RenderContext<'_>,
) -> CellContent {
    let raw = record.get(&column.key);
    match &column.render {
        Some(renderer) => CellContent::Node(renderer.apply(raw, record, row_index, ctx)),
        None => CellContent::Value(raw.cloned()),
    }
}
