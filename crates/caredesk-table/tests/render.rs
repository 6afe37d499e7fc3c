//! Integration tests for the render pass.

use std::cell::RefCell;

use caredesk_model::{ListPage, Record, RecordId};
use caredesk_table::{
    Action, ActionBinding, ActionHandler, ActionKind, ActionSet, Align, BuiltinOptions,
    CellContent, CellRenderer, Column, Diagnostic, Node, PaginationControl, RawColumn,
    RenderContext, RendererRegistry, RowUnit, Table, TableOptions, normalize_columns,
    render_rows,
};
use chrono::NaiveDate;
use serde_json::json;

fn records(values: serde_json::Value) -> Vec<Record> {
    ListPage::from_value(values).unwrap().records
}

fn reference_registry() -> RendererRegistry {
    RendererRegistry::builtin_with(BuiltinOptions {
        reference_date: NaiveDate::from_ymd_opt(2024, 6, 1),
    })
}

#[test]
fn legacy_descriptor_renders_plain_values() {
    let columns = normalize_columns(&[RawColumn::new().header("Name").accessor("name")]);
    assert_eq!(columns, vec![Column::new("Name", "name")]);

    let rendered = Table::from_columns(columns)
        .render(&records(json!([{"name": "Ann"}, {"name": "Bo"}])));

    assert_eq!(rendered.row_count(), 2);
    let names: Vec<String> = rendered
        .body
        .iter()
        .map(|row| row.cells()[0].content.plain_text())
        .collect();
    assert_eq!(names, vec!["Ann", "Bo"]);
}

#[test]
fn age_column_computes_years() {
    let table = Table::with_registry(
        &[RawColumn::new()
            .title("Age")
            .data_index("dob")
            .render_named("age")],
        &reference_registry(),
    );
    let rendered = table.render(&records(json!([{"dob": "2000-01-01"}])));

    assert_eq!(
        rendered.body[0].cells()[0].content,
        CellContent::Node(Node::value(24))
    );
}

#[test]
fn empty_records_yield_one_spanning_row() {
    let table = Table::new(&[
        RawColumn::new().title("Name").data_index("name"),
        RawColumn::new().title("Email").data_index("email"),
        RawColumn::new().title("Phone").data_index("phone"),
    ]);
    let rendered = table.render(&[]);

    assert_eq!(
        rendered.body,
        vec![RowUnit::Empty {
            message: "No data available".to_string(),
            span: 3
        }]
    );
}

#[test]
fn missing_fields_and_non_objects_degrade_to_empty_cells() {
    let table = Table::new(&[
        RawColumn::new().title("Name").data_index("name"),
        RawColumn::new().title("Email").data_index("email"),
    ]);
    let rendered = table.render(&records(json!([{"name": "Ann"}, 17, null])));

    assert_eq!(rendered.row_count(), 3);
    assert_eq!(rendered.body[0].cells()[1].content, CellContent::Value(None));
    assert_eq!(rendered.body[1].cells()[0].content, CellContent::Value(None));
    assert_eq!(rendered.body[2].cells()[0].content, CellContent::Value(None));
}

#[test]
fn renderer_receives_row_index() {
    let numbered = CellRenderer::new("row_number", |_, _, index, _| Node::value(index + 1));
    let table = Table::new(&[
        RawColumn::new().title("#").render_with(numbered),
        RawColumn::new().title("Name").data_index("name"),
    ]);
    let rendered = table.render(&records(json!([{"name": "Ann"}, {"name": "Bo"}])));

    let numbers: Vec<String> = rendered
        .body
        .iter()
        .map(|row| row.cells()[0].content.plain_text())
        .collect();
    assert_eq!(numbers, vec!["1", "2"]);
    assert_eq!(rendered.diagnostics, vec![Diagnostic::MissingKey { column: 0 }]);
}

#[test]
fn body_cells_follow_column_alignment() {
    let table = Table::new(&[
        RawColumn::new().title("Name").data_index("name"),
        RawColumn::new().title("Age").data_index("age").align("right"),
        RawColumn::new().title("Ok").data_index("ok").align("center"),
    ]);
    let rendered = table.render(&records(json!([{"name": "Ann", "age": 3, "ok": true}])));

    let aligns: Vec<Align> = rendered.body[0].cells().iter().map(|cell| cell.align).collect();
    assert_eq!(aligns, vec![Align::Left, Align::Right, Align::Center]);
    let header: Vec<Align> = rendered.header.iter().map(|cell| cell.align).collect();
    assert_eq!(aligns, header);
}

#[test]
fn render_rows_is_usable_without_a_table() {
    let columns = vec![Column::new("Name", "name")];
    let rows = render_rows(
        &columns,
        &records(json!([{"name": "Ann"}])),
        "none",
        &RenderContext::default(),
    );
    assert_eq!(rows.len(), 1);
}

#[test]
fn rendering_is_repeatable() {
    let table = Table::new(&[
        RawColumn::new().title("Name").data_index("name"),
        RawColumn::new()
            .title("Status")
            .data_index("status")
            .render_named("status"),
    ]);
    let input = records(json!([{"name": "Ann", "status": "verified"}]));
    assert_eq!(table.render(&input), table.render(&input));
}

#[derive(Default)]
struct Verifier {
    verified: RefCell<Vec<String>>,
}

impl ActionHandler for Verifier {
    fn on_action(&self, kind: &ActionKind, record_id: &RecordId) {
        if *kind == ActionKind::Verify {
            self.verified.borrow_mut().push(record_id.to_string());
        }
    }
}

#[test]
fn verification_workflow_routes_through_handler() {
    let actions = ActionSet::new([
        Action::new(ActionKind::View),
        Action::new(ActionKind::Verify).with_label("Approve"),
    ]);
    let table = Table::new(&[
        RawColumn::new().title("Provider").data_index("name"),
        RawColumn::new()
            .title("Status")
            .data_index("status")
            .render_named("status"),
        RawColumn::new().title("Actions").render_named("actions"),
    ])
    .actions(actions.clone())
    .options(TableOptions {
        row_key: Some("id".to_string()),
        ..TableOptions::default()
    });

    let rendered = table.render(&records(json!({
        "data": [
            {"id": "PR-1", "name": "Dr. Osei", "status": "pending"},
            {"id": "PR-2", "name": "Dr. Lee", "status": "verified"}
        ],
        "page": 1,
        "totalPages": 1
    })));

    let bindings: Vec<ActionBinding> = rendered
        .body
        .iter()
        .filter_map(|row| match &row.cells()[2].content {
            CellContent::Node(Node::Group { children }) => Some(children.clone()),
            _ => None,
        })
        .flatten()
        .filter_map(|node| match node {
            Node::Button { binding, .. } => Some(binding),
            _ => None,
        })
        .filter(|binding| binding.kind == ActionKind::Verify)
        .collect();
    assert_eq!(bindings.len(), 2);

    let handler = Verifier::default();
    for binding in &bindings {
        assert!(actions.dispatch(binding, &handler));
    }
    assert_eq!(*handler.verified.borrow(), vec!["PR-1", "PR-2"]);

    let RowUnit::Data { key, .. } = &rendered.body[1] else {
        panic!("expected data row");
    };
    assert_eq!(key.as_deref(), Some("PR-2"));
}

#[test]
fn pagination_is_composed_beside_the_table() {
    let page = ListPage::from_value(json!({
        "items": [{"name": "Ann"}],
        "page": 2,
        "totalPages": 3,
        "totalCount": 21
    }))
    .unwrap();
    let table = Table::new(&[RawColumn::new().title("Name").data_index("name")]);
    let rendered = table.render(&page.records);
    let control = PaginationControl::from_page(&page).unwrap();

    assert_eq!(rendered.row_count(), 1);
    assert_eq!(control.label(), "Page 2 of 3 (21 rows)");
    assert!(control.has_previous());
    assert!(control.has_next());
}
