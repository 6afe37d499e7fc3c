//! Property tests for normalization and row shape.

use caredesk_model::Record;
use caredesk_table::{
    RawColumn, RenderContext, RowUnit, Table, TableOptions, normalize_columns, prefer,
    render_rows,
};
use proptest::prelude::*;
use serde_json::{Map, Value};

fn raw_column() -> impl Strategy<Value = RawColumn> {
    (
        proptest::option::of("[A-Za-z ]{0,12}"),
        proptest::option::of("[A-Za-z ]{0,12}"),
        proptest::option::of("[a-z]{1,8}"),
        proptest::option::of("[a-z]{1,8}"),
        proptest::option::of(prop_oneof![
            Just("left".to_string()),
            Just("center".to_string()),
            Just("right".to_string()),
            "[a-z]{1,8}",
        ]),
    )
        .prop_map(|(title, header, data_index, accessor, align)| RawColumn {
            title,
            header,
            data_index,
            accessor,
            align,
            ..RawColumn::default()
        })
}

fn record() -> impl Strategy<Value = Record> {
    proptest::collection::btree_map("[a-z]{1,8}", "[a-zA-Z0-9 ]{0,10}", 0..6).prop_map(|fields| {
        let map: Map<String, Value> = fields
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();
        Record::from(map)
    })
}

proptest! {
    #[test]
    fn normalization_preserves_order_and_count(raw in proptest::collection::vec(raw_column(), 0..8)) {
        let columns = normalize_columns(&raw);
        prop_assert_eq!(columns.len(), raw.len());
        for (column, source) in columns.iter().zip(&raw) {
            let title = prefer(source.title.clone(), source.header.clone()).unwrap_or_default();
            let key = prefer(source.data_index.clone(), source.accessor.clone()).unwrap_or_default();
            prop_assert_eq!(&column.title, &title);
            prop_assert_eq!(&column.key, &key);
        }
    }

    #[test]
    fn legacy_and_current_names_are_interchangeable(title in "[A-Za-z]{1,10}", key in "[a-z]{1,8}") {
        let legacy = normalize_columns(&[RawColumn::new().header(title.clone()).accessor(key.clone())]);
        let current = normalize_columns(&[RawColumn::new().title(title).data_index(key)]);
        prop_assert_eq!(legacy, current);
    }

    #[test]
    fn rows_match_records_and_columns(
        raw in proptest::collection::vec(raw_column(), 0..6),
        records in proptest::collection::vec(record(), 0..10),
    ) {
        let columns = normalize_columns(&raw);
        let rows = render_rows(&columns, &records, "empty", &RenderContext::default());

        if records.is_empty() {
            prop_assert_eq!(rows.len(), 1);
            match &rows[0] {
                RowUnit::Empty { span, .. } => prop_assert_eq!(*span, columns.len()),
                RowUnit::Data { .. } => prop_assert!(false, "expected empty-state row"),
            }
        } else {
            prop_assert_eq!(rows.len(), records.len());
            for (position, row) in rows.iter().enumerate() {
                match row {
                    RowUnit::Data { index, cells, .. } => {
                        prop_assert_eq!(*index, position);
                        prop_assert_eq!(cells.len(), columns.len());
                    }
                    RowUnit::Empty { .. } => prop_assert!(false, "unexpected empty-state row"),
                }
            }
        }
    }

    #[test]
    fn flags_never_change_content(
        raw in proptest::collection::vec(raw_column(), 0..5),
        records in proptest::collection::vec(record(), 0..5),
        striped in any::<bool>(),
        hoverable in any::<bool>(),
        bordered in any::<bool>(),
        compact in any::<bool>(),
    ) {
        let table = Table::new(&raw);
        let plain = table.render(&records);
        let styled = table
            .clone()
            .options(TableOptions { striped, hoverable, bordered, compact, ..TableOptions::default() })
            .render(&records);
        prop_assert_eq!(plain.header, styled.header);
        prop_assert_eq!(plain.body, styled.body);
    }
}
