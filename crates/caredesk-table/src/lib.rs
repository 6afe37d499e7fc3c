//! Declarative table rendering for the caredesk administration dashboard.
//!
//! Pages describe a table with column descriptors ([`RawColumn`]) and hand it
//! the records fetched from a list endpoint. A render pass normalizes the
//! columns, resolves every cell, and returns a [`RenderedTable`] which the
//! [`emit`] functions turn into HTML, terminal text or JSON.
//!
//! ```
//! use caredesk_model::Record;
//! use caredesk_table::{RawColumn, Table};
//! use serde_json::json;
//!
//! let table = Table::new(&[RawColumn::new().header("Name").accessor("name")]);
//! let rendered = table.render(&[Record::new(json!({"name": "Ann"}))]);
//! assert_eq!(rendered.header[0].title, "Name");
//! assert_eq!(rendered.row_count(), 1);
//! ```

pub mod actions;
pub mod builtin;
pub mod cache;
pub mod column;
pub mod diagnostics;
pub mod emit;
pub mod error;
pub mod node;
pub mod pagination;
pub mod registry;
pub mod renderer;
pub mod resolve;
pub mod rows;
pub mod table;
pub mod view;

pub use actions::{Action, ActionBinding, ActionHandler, ActionKind, ActionSet};
pub use builtin::{BUILTIN_RENDERERS, BuiltinOptions};
pub use cache::RenderCache;
pub use column::{
    Align, Column, Normalized, RawColumn, RenderRef, Width, WidthSpec, normalize_columns,
    normalize_columns_with, prefer,
};
pub use diagnostics::Diagnostic;
pub use error::{EmitError, ViewError};
pub use node::{CellContent, Node, Tone};
pub use pagination::PaginationControl;
pub use registry::{RendererFactory, RendererRegistry};
pub use renderer::{CellRenderer, RenderContext};
pub use resolve::resolve_cell;
pub use rows::{BodyCell, DEFAULT_EMPTY_MESSAGE, RowUnit, render_rows, render_rows_keyed};
pub use table::{HeaderCell, PresentationFlags, RenderedTable, Table, TableOptions, render_table};
pub use view::ViewDefinition;
