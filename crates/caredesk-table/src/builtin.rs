//! Built-in transforms used across the dashboard's list pages.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::warn;

use crate::node::{Node, Tone, value_text};
use crate::registry::RendererRegistry;
use crate::renderer::CellRenderer;

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

const DEFAULT_NAME_FIELDS: [&str; 2] = ["firstName", "lastName"];

/// Name and one-line description of every built-in renderer.
pub const BUILTIN_RENDERERS: &[(&str, &str)] = &[
    ("text", "Scalar as plain text; missing and null show as blank"),
    (
        "date",
        "ISO date or datetime reformatted (arg: strftime format, default %Y-%m-%d)",
    ),
    (
        "age",
        "Whole years since an ISO date (arg: reference date YYYY-MM-DD, default today)",
    ),
    (
        "full_name",
        "Name fields joined with spaces (args: field names, default firstName lastName)",
    ),
    ("status", "Verification or account status as a toned badge"),
    ("yes_no", "Booleans as Yes/No"),
    ("actions", "Row action buttons bound to the record identifier"),
];

/// Settings shared by the built-ins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuiltinOptions {
    /// Date `age` measures against when the column gives none. Today if unset.
    pub reference_date: Option<NaiveDate>,
}

pub(crate) fn register_all(registry: &mut RendererRegistry, options: BuiltinOptions) {
    registry.register_renderer(text());
    registry.register("date", |args: &[String]| date(args.first().map(String::as_str)));
    registry.register("age", move |args: &[String]| {
        let reference = match args.first() {
            Some(text) => parse_date(text).or_else(|| {
                warn!(reference = %text, "age: unparsed reference date, using default");
                options.reference_date
            }),
            None => options.reference_date,
        };
        age(reference)
    });
    registry.register("full_name", |args: &[String]| full_name(args));
    registry.register_renderer(status());
    registry.register_renderer(yes_no());
    registry.register_renderer(actions());
}

fn renderer_name(base: &str, args: &[String]) -> String {
    if args.is_empty() {
        base.to_string()
    } else {
        format!("{base}({})", args.join(","))
    }
}

pub fn text() -> CellRenderer {
    CellRenderer::named("text", |value, _, _, _| match value {
        None | Some(Value::Null) => Node::Empty,
        Some(value) => Node::text(value_text(value)),
    })
}

pub fn date(format: Option<&str>) -> CellRenderer {
    let format = match format {
        Some(format) if is_valid_format(format) => format.to_string(),
        Some(format) => {
            warn!(%format, "date: invalid format, using {DEFAULT_DATE_FORMAT}");
            DEFAULT_DATE_FORMAT.to_string()
        }
        None => DEFAULT_DATE_FORMAT.to_string(),
    };
    let name = if format == DEFAULT_DATE_FORMAT {
        "date".to_string()
    } else {
        renderer_name("date", std::slice::from_ref(&format))
    };
    CellRenderer::named(name, move |value, _, _, _| {
        let Some(text) = value.and_then(Value::as_str) else {
            return value.map_or(Node::Empty, |value| match value {
                Value::Null => Node::Empty,
                other => Node::text(value_text(other)),
            });
        };
        match parse_date(text) {
            Some(date) => Node::text(
                date.format_with_items(StrftimeItems::new(&format))
                    .to_string(),
            ),
            None => Node::text(text),
        }
    })
}

pub fn age(reference: Option<NaiveDate>) -> CellRenderer {
    let name = match reference {
        Some(date) => format!("age({date})"),
        None => "age".to_string(),
    };
    let renderer = CellRenderer::named(name, move |value, _, _, _| {
        let on = reference.unwrap_or_else(|| Local::now().date_naive());
        value
            .and_then(Value::as_str)
            .and_then(parse_date)
            .and_then(|birth| age_on(birth, on))
            .map_or(Node::Empty, Node::value)
    });
    if reference.is_some() {
        renderer
    } else {
        renderer.volatile()
    }
}

pub fn full_name(fields: &[String]) -> CellRenderer {
    let fields: Vec<String> = if fields.is_empty() {
        DEFAULT_NAME_FIELDS.iter().map(ToString::to_string).collect()
    } else {
        fields.to_vec()
    };
    let name = renderer_name("full_name", &fields);
    CellRenderer::named(name, move |_, record, _, _| {
        let parts: Vec<&str> = fields
            .iter()
            .filter_map(|field| record.get_str(field))
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        if parts.is_empty() {
            Node::Empty
        } else {
            Node::text(parts.join(" "))
        }
    })
}

pub fn status() -> CellRenderer {
    CellRenderer::named("status", |value, _, _, _| match value {
        Some(Value::String(text)) if !text.trim().is_empty() => {
            Node::badge(humanize(text), status_tone(text))
        }
        _ => Node::Empty,
    })
}

pub fn yes_no() -> CellRenderer {
    CellRenderer::named("yes_no", |value, _, _, _| match value {
        Some(Value::Bool(true)) => Node::text("Yes"),
        Some(Value::Bool(false)) => Node::text("No"),
        None | Some(Value::Null) => Node::Empty,
        Some(other) => Node::text(value_text(other)),
    })
}

pub fn actions() -> CellRenderer {
    CellRenderer::named("actions", |_, record, row_index, ctx| {
        if ctx.actions.is_empty() {
            Node::Empty
        } else {
            Node::group(ctx.actions.bind(record, row_index))
        }
    })
}

/// Parse the date part of an ISO date, RFC 3339 timestamp or naive datetime.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|datetime| datetime.date())
}

/// Completed years between `birth` and `on`; `None` if `birth` is later.
pub fn age_on(birth: NaiveDate, on: NaiveDate) -> Option<i32> {
    if birth > on {
        return None;
    }
    let mut years = on.year() - birth.year();
    if (on.month(), on.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    Some(years)
}

pub fn status_tone(status: &str) -> Tone {
    match status.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
        "verified" | "active" | "approved" | "completed" => Tone::Success,
        "pending" | "in_review" | "submitted" | "unverified" => Tone::Warning,
        "rejected" | "inactive" | "suspended" | "expired" | "denied" => Tone::Danger,
        _ => Tone::Neutral,
    }
}

fn humanize(text: &str) -> String {
    let spaced = text.trim().replace(['_', '-'], " ").to_lowercase();
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn is_valid_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}
