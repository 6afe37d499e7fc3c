//! Table composition: header, body and presentation flags.

use caredesk_model::Record;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::actions::ActionSet;
use crate::column::{Align, Column, RawColumn, Width, normalize_columns_with};
use crate::diagnostics::Diagnostic;
use crate::registry::RendererRegistry;
use crate::renderer::{CellRenderer, RenderContext};
use crate::rows::{DEFAULT_EMPTY_MESSAGE, RowUnit, render_rows_keyed};

/// Per-table settings, as found under `[options]` in a view file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableOptions {
    pub striped: bool,
    pub hoverable: bool,
    pub bordered: bool,
    pub compact: bool,
    pub empty_message: String,
    /// Record field holding a stable row identifier.
    pub row_key: Option<String>,
    /// Treat degraded column descriptors as failures (enforced by callers).
    pub strict: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            striped: false,
            hoverable: true,
            bordered: false,
            compact: false,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            row_key: None,
            strict: false,
        }
    }
}

impl TableOptions {
    pub fn flags(&self) -> PresentationFlags {
        PresentationFlags {
            striped: self.striped,
            hoverable: self.hoverable,
            bordered: self.bordered,
            compact: self.compact,
        }
    }
}

/// Visual modifiers. They never change the header or body content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PresentationFlags {
    pub striped: bool,
    pub hoverable: bool,
    pub bordered: bool,
    pub compact: bool,
}

impl Default for PresentationFlags {
    fn default() -> Self {
        TableOptions::default().flags()
    }
}

impl PresentationFlags {
    /// Modifier class names, base class first.
    pub fn classes(&self) -> Vec<&'static str> {
        let mut classes = vec!["table"];
        for (enabled, class) in [
            (self.striped, "table--striped"),
            (self.hoverable, "table--hoverable"),
            (self.bordered, "table--bordered"),
            (self.compact, "table--compact"),
        ] {
            if enabled {
                classes.push(class);
            }
        }
        classes
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
    pub title: String,
    pub align: Align,
    pub width: Width,
}

/// Output of one render pass. Holds no reference to its inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedTable {
    pub header: Vec<HeaderCell>,
    pub body: Vec<RowUnit>,
    pub flags: PresentationFlags,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl RenderedTable {
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Number of data rows; the empty-state row is not counted.
    pub fn row_count(&self) -> usize {
        self.body.iter().filter(|row| !row.is_empty_state()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }
}

/// A configured table: normalized columns plus options and row actions.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    diagnostics: Vec<Diagnostic>,
    options: TableOptions,
    actions: ActionSet,
}

impl Table {
    /// Normalize `raw` against the built-in renderers.
    pub fn new(raw: &[RawColumn]) -> Self {
        Self::with_registry(raw, &RendererRegistry::builtin())
    }

    pub fn with_registry(raw: &[RawColumn], registry: &RendererRegistry) -> Self {
        let normalized = normalize_columns_with(raw, registry);
        Self {
            columns: normalized.columns,
            diagnostics: normalized.diagnostics,
            options: TableOptions::default(),
            actions: ActionSet::default(),
        }
    }

    /// Use already canonical columns.
    pub fn from_columns(columns: Vec<Column>) -> Self {
        Self {
            columns,
            diagnostics: Vec::new(),
            options: TableOptions::default(),
            actions: ActionSet::default(),
        }
    }

    #[must_use]
    pub fn options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn actions(mut self, actions: ActionSet) -> Self {
        self.actions = actions;
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn table_options(&self) -> &TableOptions {
        &self.options
    }

    pub fn row_actions(&self) -> &ActionSet {
        &self.actions
    }

    /// Whether a previous render of equal inputs can be reused.
    pub fn is_cacheable(&self) -> bool {
        !self
            .columns
            .iter()
            .filter_map(|column| column.render.as_ref())
            .any(CellRenderer::is_volatile)
    }

    pub fn render(&self, records: &[Record]) -> RenderedTable {
        let mut rendered = render_table(&self.columns, records, &self.options, &self.actions);
        rendered.diagnostics.clone_from(&self.diagnostics);
        rendered
    }
}

/// Render `records` under `columns`.
///
/// The header is built once from the columns, the body by the row renderer.
/// Malformed input degrades to empty cells; this never fails.
pub fn render_table(
    columns: &[Column],
    records: &[Record],
    options: &TableOptions,
    actions: &ActionSet,
) -> RenderedTable {
    let span = debug_span!(
        "render_table",
        columns = columns.len(),
        records = records.len()
    );
    let _guard = span.enter();

    let header = columns
        .iter()
        .map(|column| HeaderCell {
            title: column.title.clone(),
            align: column.align,
            width: column.width,
        })
        .collect();

    let ctx = RenderContext::new(actions);
    let body = render_rows_keyed(
        columns,
        records,
        &options.empty_message,
        options.row_key.as_deref(),
        &ctx,
    );

    debug!(rows = body.len(), "table rendered");
    RenderedTable {
        header,
        body,
        flags: options.flags(),
        diagnostics: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use caredesk_model::RecordId;
    use serde_json::json;

    use super::*;
    use crate::actions::{Action, ActionKind};
    use crate::node::{CellContent, Node};

    fn records() -> Vec<Record> {
        vec![
            Record::new(json!({"id": 1, "name": "Ann"})),
            Record::new(json!({"id": 2, "name": "Bo"})),
        ]
    }

    #[test]
    fn default_flags() {
        let flags = TableOptions::default().flags();
        assert!(!flags.striped);
        assert!(flags.hoverable);
        assert!(!flags.bordered);
        assert!(!flags.compact);
        assert_eq!(flags.classes(), vec!["table", "table--hoverable"]);
    }

    #[test]
    fn header_mirrors_columns() {
        let table = Table::new(&[
            RawColumn::new().title("Name").data_index("name"),
            RawColumn::new()
                .header("Age")
                .accessor("dob")
                .align("right")
                .width("10%"),
        ]);
        let rendered = table.render(&records());

        assert_eq!(
            rendered.header,
            vec![
                HeaderCell {
                    title: "Name".to_string(),
                    align: Align::Left,
                    width: Width::Auto
                },
                HeaderCell {
                    title: "Age".to_string(),
                    align: Align::Right,
                    width: Width::Percent(10)
                },
            ]
        );
        assert_eq!(rendered.row_count(), 2);
    }

    #[test]
    fn flags_do_not_change_content() {
        let table = Table::new(&[RawColumn::new().title("Name").data_index("name")]);
        let plain = table.render(&records());
        let styled = table
            .clone()
            .options(TableOptions {
                striped: true,
                hoverable: false,
                bordered: true,
                compact: true,
                ..TableOptions::default()
            })
            .render(&records());

        assert_eq!(plain.header, styled.header);
        assert_eq!(plain.body, styled.body);
        assert_ne!(plain.flags, styled.flags);
    }

    #[test]
    fn empty_records_use_configured_message() {
        let table = Table::new(&[
            RawColumn::new().title("A").data_index("a"),
            RawColumn::new().title("B").data_index("b"),
        ])
        .options(TableOptions {
            empty_message: "No patients found".to_string(),
            ..TableOptions::default()
        });
        let rendered = table.render(&[]);

        assert!(rendered.is_empty());
        assert_eq!(
            rendered.body,
            vec![RowUnit::Empty {
                message: "No patients found".to_string(),
                span: 2
            }]
        );
    }

    #[test]
    fn diagnostics_travel_with_output() {
        let table = Table::new(&[RawColumn::new().data_index("a")]);
        let rendered = table.render(&records());
        assert_eq!(
            rendered.diagnostics,
            vec![Diagnostic::MissingTitle { column: 0 }]
        );
    }

    #[test]
    fn action_column_binds_row_ids() {
        let table = Table::new(&[
            RawColumn::new().title("Name").data_index("name"),
            RawColumn::new().title("Actions").render_named("actions"),
        ])
        .actions(ActionSet::new([Action::new(ActionKind::Verify)]));
        let rendered = table.render(&records());

        let cell = &rendered.body[1].cells()[1];
        let CellContent::Node(Node::Group { children }) = &cell.content else {
            panic!("expected action group, got {:?}", cell.content);
        };
        let Node::Button { binding, .. } = &children[0] else {
            panic!("expected button");
        };
        assert_eq!(binding.record_id, Some(RecordId::new("2")));
        assert_eq!(binding.row_index, 1);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: TableOptions =
            serde_json::from_value(json!({"striped": true, "rowKey": "id"})).unwrap();
        assert!(options.striped);
        assert!(options.hoverable);
        assert_eq!(options.empty_message, DEFAULT_EMPTY_MESSAGE);
        assert_eq!(options.row_key.as_deref(), Some("id"));
    }
}
