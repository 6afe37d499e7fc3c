//! Body rows.

use caredesk_model::Record;
use serde::Serialize;

use crate::column::{Align, Column};
use crate::node::CellContent;
use crate::renderer::RenderContext;
use crate::resolve::resolve_cell;

pub const DEFAULT_EMPTY_MESSAGE: &str = "No data available";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyCell {
    pub content: CellContent,
    pub align: Align,
}

/// One unit of the table body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RowUnit {
    Data {
        /// Position of the record in the input.
        index: usize,
        /// Stable identifier, when the table is configured with a row key.
        #[serde(skip_serializing_if = "Option::is_none")]
        key: Option<String>,
        cells: Vec<BodyCell>,
    },
    /// Placeholder shown when there are no records.
    Empty { message: String, span: usize },
}

impl RowUnit {
    pub fn is_empty_state(&self) -> bool {
        matches!(self, RowUnit::Empty { .. })
    }

    pub fn cells(&self) -> &[BodyCell] {
        match self {
            RowUnit::Data { cells, .. } => cells,
            RowUnit::Empty { .. } => &[],
        }
    }
}

/// One data row per record, or a single empty-state row when there are none.
pub fn render_rows(
    columns: &[Column],
    records: &[Record],
    empty_message: &str,
    ctx: &RenderContext<'_>,
) -> Vec<RowUnit> {
    render_rows_keyed(columns, records, empty_message, None, ctx)
}

/// Like [`render_rows`], also reading each row's key from `row_key`.
pub fn render_rows_keyed(
    columns: &[Column],
    records: &[Record],
    empty_message: &str,
    row_key: Option<&str>,
    ctx: &RenderContext<'_>,
) -> Vec<RowUnit> {
    if records.is_empty() {
        return vec![RowUnit::Empty {
            message: empty_message.to_string(),
            span: columns.len(),
        }];
    }

    records
        .iter()
        .enumerate()
        .map(|(index, record)| RowUnit::Data {
            index,
            key: row_key
                .and_then(|field| record.id(field))
                .map(|id| id.to_string()),
            cells: columns
                .iter()
                .map(|column| BodyCell {
                    content: resolve_cell(column, record, index, ctx),
                    align: column.align,
                })
                .collect(),
        })
        .collect()
}
