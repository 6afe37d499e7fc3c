use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, trace};

use caredesk_model::ListPage;
use caredesk_table::emit::{
    TextOptions, to_html_with_pagination, to_json_value, to_text_with_pagination,
};
use caredesk_table::{
    BuiltinOptions, Diagnostic, PaginationControl, RenderedTable, RendererRegistry, RowUnit,
    TableOptions, ViewDefinition,
};

use crate::cli::{OutputFormatArg, RenderArgs};
use crate::logging::redact_value;
use crate::summary::renderers_table;

/// Result of `caredesk render`.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    /// Emitted table in the requested format.
    pub output: String,
    pub rows: usize,
    pub diagnostics: Vec<Diagnostic>,
    /// Whether degraded descriptors count as failures.
    pub strict: bool,
}

impl RenderOutcome {
    pub fn has_errors(&self) -> bool {
        self.strict && !self.diagnostics.is_empty()
    }
}

pub fn run_renderers() -> Result<()> {
    println!("{}", renderers_table());
    Ok(())
}

/// Render `args.records` through the view in `args.view`.
///
/// `styled` enables ANSI styling of text output.
pub fn run_render(args: &RenderArgs, styled: bool) -> Result<RenderOutcome> {
    let span = info_span!("render", view = %args.view.display());
    let _guard = span.enter();

    let mut view = ViewDefinition::load(&args.view)
        .with_context(|| format!("load view {}", args.view.display()))?;
    apply_overrides(&mut view.options, args);
    let strict = view.options.strict;
    if let Some(title) = &view.title {
        debug!(%title, "view title");
    }

    let page = load_records(&args.records)?;
    info!(
        records = page.len(),
        paged = page.pagination.is_some(),
        "loaded records"
    );

    let registry = RendererRegistry::builtin_with(BuiltinOptions {
        reference_date: args.reference_date,
    });
    let table = view.into_table(&registry);
    let rendered = table.render(&page.records);
    trace_rows(&rendered);

    let pagination = PaginationControl::from_page(&page);
    let output = match args.format {
        OutputFormatArg::Text => to_text_with_pagination(
            &rendered,
            pagination.as_ref(),
            &TextOptions {
                width: args.width,
                styled,
            },
        ),
        OutputFormatArg::Html => {
            to_html_with_pagination(&rendered, pagination.as_ref()).context("emit html")?
        }
        OutputFormatArg::Json => json_output(&rendered, pagination.as_ref())?,
    };

    info!(rows = rendered.row_count(), "table rendered");
    Ok(RenderOutcome {
        output,
        rows: rendered.row_count(),
        diagnostics: rendered.diagnostics,
        strict,
    })
}

/// Flags given on the command line win over the view file.
fn apply_overrides(options: &mut TableOptions, args: &RenderArgs) {
    options.striped |= args.striped;
    options.bordered |= args.bordered;
    options.compact |= args.compact;
    options.strict |= args.strict;
    if args.no_hover {
        options.hoverable = false;
    }
    if let Some(message) = &args.empty_message {
        options.empty_message.clone_from(message);
    }
}

fn load_records(path: &Path) -> Result<ListPage> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read records {}", path.display()))?;
    ListPage::from_json_str(&text).with_context(|| format!("parse records {}", path.display()))
}

fn json_output(table: &RenderedTable, pagination: Option<&PaginationControl>) -> Result<String> {
    let mut value = to_json_value(table).context("serialize table")?;
    if let (Some(control), Some(object)) = (pagination, value.as_object_mut()) {
        object.insert(
            "pagination".to_string(),
            serde_json::to_value(control).context("serialize pagination")?,
        );
    }
    serde_json::to_string_pretty(&value).context("serialize output")
}

fn trace_rows(table: &RenderedTable) {
    for row in &table.body {
        if let RowUnit::Data { index, key, cells } = row {
            let values: Vec<String> = cells.iter().map(|cell| cell.content.plain_text()).collect();
            trace!(
                row = index,
                key = key.as_deref().map(redact_value),
                values = redact_value(&values.join(" | ")),
                "rendered row"
            );
        }
    }
}
