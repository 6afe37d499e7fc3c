//! Memoization of whole render passes.

use caredesk_model::Record;
use tracing::trace;

use crate::table::{RenderedTable, Table};

#[derive(Debug, Clone)]
struct Entry {
    table: Table,
    records: Vec<Record>,
    output: RenderedTable,
}

/// Remembers the last render pass and replays it for value-equal inputs.
///
/// Columns built from a registry compare by renderer name, so a table rebuilt
/// from the same view definition hits the cache. Ad hoc renderers only match
/// clones of themselves. Tables with a volatile renderer always re-render.
#[derive(Debug, Clone, Default)]
pub struct RenderCache {
    last: Option<Entry>,
    hits: u64,
    misses: u64,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, table: &Table, records: &[Record]) -> &RenderedTable {
        let hit = table.is_cacheable()
            && matches!(
                &self.last,
                Some(entry) if entry.table == *table && entry.records == records
            );
        if hit {
            self.hits += 1;
            trace!(hits = self.hits, "render cache hit");
        } else {
            self.misses += 1;
            trace!(misses = self.misses, "render cache miss");
            self.last = None;
        }
        let entry = self.last.get_or_insert_with(|| Entry {
            table: table.clone(),
            records: records.to_vec(),
            output: table.render(records),
        });
        &entry.output
    }

    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;
    use crate::column::{Column, RawColumn};
    use crate::node::Node;
    use crate::renderer::CellRenderer;
    use crate::table::TableOptions;

    fn records() -> Vec<Record> {
        vec![Record::new(json!({"name": "Ann"}))]
    }

    fn table() -> Table {
        Table::new(&[RawColumn::new().title("Name").data_index("name")])
    }

    #[test]
    fn equal_inputs_hit() {
        let mut cache = RenderCache::new();
        let first = cache.render(&table(), &records()).clone();
        let second = cache.render(&table(), &records()).clone();

        assert_eq!(first, second);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn changed_records_or_options_miss() {
        let mut cache = RenderCache::new();
        cache.render(&table(), &records());
        cache.render(&table(), &[]);
        cache.render(
            &table().options(TableOptions {
                striped: true,
                ..TableOptions::default()
            }),
            &[],
        );
        assert_eq!(cache.misses(), 3);
        assert_eq!(cache.hits(), 0);
    }

    #[test]
    fn registry_renderers_match_by_name() {
        let calls = Arc::new(AtomicUsize::new(0));
        let make = |calls: Arc<AtomicUsize>| {
            Table::from_columns(vec![Column::new("Name", "name").with_render(
                CellRenderer::named("counted", move |_, _, _, _| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Node::text("x")
                }),
            )])
        };

        let mut cache = RenderCache::new();
        cache.render(&make(Arc::clone(&calls)), &records());
        cache.render(&make(Arc::clone(&calls)), &records());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn replaced_transform_with_same_name_misses() {
        let table_with = |text: &'static str| {
            Table::from_columns(vec![Column::new("Name", "name").with_render(
                CellRenderer::new("r", move |_, _, _, _| Node::text(text)),
            )])
        };

        let mut cache = RenderCache::new();
        let first = cache.render(&table_with("first"), &records()).clone();
        let second = cache.render(&table_with("second"), &records()).clone();

        assert_eq!(first.body[0].cells()[0].content.plain_text(), "first");
        assert_eq!(second.body[0].cells()[0].content.plain_text(), "second");
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn changed_columns_miss() {
        let mut cache = RenderCache::new();
        cache.render(&table(), &records());
        cache.render(
            &Table::new(&[RawColumn::new().title("Patient").data_index("name")]),
            &records(),
        );
        cache.render(
            &Table::new(&[RawColumn::new()
                .title("Patient")
                .data_index("name")
                .render_named("status")]),
            &records(),
        );
        assert_eq!(cache.misses(), 3);
        assert_eq!(cache.hits(), 0);
    }

    #[test]
    fn volatile_tables_always_rerender() {
        let table = Table::from_columns(vec![
            Column::new("Age", "dob").with_render(crate::builtin::age(None)),
        ]);
        let mut cache = RenderCache::new();
        cache.render(&table, &records());
        cache.render(&table, &records());
        assert_eq!(cache.misses(), 2);
        assert_eq!(cache.hits(), 0);
    }

    #[test]
    fn invalidate_forces_rerender() {
        let mut cache = RenderCache::new();
        cache.render(&table(), &records());
        cache.invalidate();
        cache.render(&table(), &records());
        assert_eq!(cache.misses(), 2);
    }
}
