//! Column descriptors and their normalization.
//!
//! Pages describe columns in one of two naming conventions:
//!
//! | canonical | current name | legacy name |
//! |-----------|--------------|-------------|
//! | `title`   | `title`      | `header`    |
//! | `key`     | `dataIndex`  | `accessor`  |
//!
//! [`normalize_columns`] folds both into a [`Column`]. The current name wins
//! whenever it is present; otherwise the legacy name is used; if neither is
//! present the canonical field is left empty and a [`Diagnostic`] is recorded
//! instead of failing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::diagnostics::Diagnostic;
use crate::registry::RendererRegistry;
use crate::renderer::CellRenderer;

/// Horizontal alignment applied to a column's header and body cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Align {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(Align::Left),
            "center" => Ok(Align::Center),
            "right" => Ok(Align::Right),
            _ => Err(format!("Unknown alignment: {s}")),
        }
    }
}

/// Layout width hint for a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Width {
    #[default]
    Auto,
    /// Fixed width in pixels (characters for text output).
    Fixed(u32),
    /// Share of the table width, 1 to 100.
    Percent(u8),
}

impl Width {
    /// CSS value for the hint, `None` for `auto`.
    pub fn css(&self) -> Option<String> {
        match self {
            Width::Auto => None,
            Width::Fixed(px) => Some(format!("{px}px")),
            Width::Percent(pct) => Some(format!("{pct}%")),
        }
    }
}

impl FromStr for Width {
    type Err = String;

    /// Accepts `auto`, `120`, `120px` and `25%`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_lowercase();
        if trimmed.is_empty() || trimmed == "auto" {
            return Ok(Width::Auto);
        }
        if let Some(pct) = trimmed.strip_suffix('%') {
            return match pct.trim().parse::<u8>() {
                Ok(value) if (1..=100).contains(&value) => Ok(Width::Percent(value)),
                _ => Err(format!("Invalid width: {s}")),
            };
        }
        let px = trimmed.strip_suffix("px").unwrap_or(&trimmed);
        px.trim()
            .parse::<u32>()
            .map(Width::Fixed)
            .map_err(|_| format!("Invalid width: {s}"))
    }
}

/// Width as written in a view file: a bare number or a string.
///
/// Anything else lands in `Other` and normalizes to `auto`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WidthSpec {
    Number(u32),
    Text(String),
    Other(Value),
}

/// Reference to a registered transform, as written in a view file.
///
/// Either a bare name (`render = "age"`) or a name with arguments
/// (`render = { name = "full_name", args = ["firstName", "lastName"] }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RenderRef {
    Name(String),
    Configured {
        name: String,
        #[serde(default)]
        args: Vec<String>,
    },
}

impl RenderRef {
    pub fn name(&self) -> &str {
        match self {
            RenderRef::Name(name) | RenderRef::Configured { name, .. } => name,
        }
    }

    pub fn args(&self) -> &[String] {
        match self {
            RenderRef::Name(_) => &[],
            RenderRef::Configured { args, .. } => args,
        }
    }
}

/// A column as supplied by the caller, in either naming convention.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawColumn {
    pub title: Option<String>,
    pub header: Option<String>,
    pub data_index: Option<String>,
    pub accessor: Option<String>,
    pub render: Option<RenderRef>,
    #[serde(deserialize_with = "lenient_text")]
    pub align: Option<String>,
    pub width: Option<WidthSpec>,
    /// A transform supplied in code. Takes precedence over `render`.
    #[serde(skip)]
    pub transform: Option<CellRenderer>,
}

impl RawColumn {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    #[must_use]
    pub fn data_index(mut self, key: impl Into<String>) -> Self {
        self.data_index = Some(key.into());
        self
    }

    #[must_use]
    pub fn accessor(mut self, key: impl Into<String>) -> Self {
        self.accessor = Some(key.into());
        self
    }

    #[must_use]
    pub fn align(mut self, align: impl Into<String>) -> Self {
        self.align = Some(align.into());
        self
    }

    #[must_use]
    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(WidthSpec::Text(width.into()));
        self
    }

    #[must_use]
    pub fn render_named(mut self, name: impl Into<String>) -> Self {
        self.render = Some(RenderRef::Name(name.into()));
        self
    }

    #[must_use]
    pub fn render_with(mut self, renderer: CellRenderer) -> Self {
        self.transform = Some(renderer);
        self
    }
}

/// Read a scalar as text, keeping non-strings as their JSON spelling so they
/// surface as diagnostics instead of failing the whole view.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

/// A column in canonical form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Column {
    pub title: String,
    pub key: String,
    pub render: Option<CellRenderer>,
    pub align: Align,
    pub width: Width,
}

impl Column {
    pub fn new(title: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            key: key.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_render(mut self, renderer: CellRenderer) -> Self {
        self.render = Some(renderer);
        self
    }

    #[must_use]
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: Width) -> Self {
        self.width = width;
        self
    }
}

/// Normalized columns plus everything that silently degraded on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub columns: Vec<Column>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Precedence rule for dual-named fields: the current convention when
/// present, else the legacy one.
pub fn prefer<T>(current: Option<T>, legacy: Option<T>) -> Option<T> {
    current.or(legacy)
}

/// Normalize columns, resolving named transforms against the built-in
/// renderers.
pub fn normalize_columns(raw: &[RawColumn]) -> Vec<Column> {
    normalize_columns_with(raw, &RendererRegistry::builtin()).columns
}

/// Normalize columns against `registry`, keeping the diagnostics.
pub fn normalize_columns_with(raw: &[RawColumn], registry: &RendererRegistry) -> Normalized {
    let mut diagnostics = Vec::new();
    let columns = raw
        .iter()
        .enumerate()
        .map(|(index, column)| normalize_column(index, column, registry, &mut diagnostics))
        .collect();
    for diagnostic in &diagnostics {
        warn!(%diagnostic, "column descriptor degraded");
    }
    Normalized {
        columns,
        diagnostics,
    }
}

fn normalize_column(
    index: usize,
    raw: &RawColumn,
    registry: &RendererRegistry,
    diagnostics: &mut Vec<Diagnostic>,
) -> Column {
    let title = prefer(raw.title.as_deref(), raw.header.as_deref());
    if title.is_none() {
        diagnostics.push(Diagnostic::MissingTitle { column: index });
    }
    let key = prefer(raw.data_index.as_deref(), raw.accessor.as_deref());
    if key.is_none() {
        diagnostics.push(Diagnostic::MissingKey { column: index });
    }

    let align = match raw.align.as_deref() {
        None => Align::Left,
        Some(value) => value.parse::<Align>().unwrap_or_else(|_| {
            diagnostics.push(Diagnostic::UnknownAlign {
                column: index,
                value: value.to_string(),
            });
            Align::Left
        }),
    };

    let width = match &raw.width {
        None => Width::Auto,
        Some(WidthSpec::Number(px)) => Width::Fixed(*px),
        Some(WidthSpec::Text(text)) => text.parse::<Width>().unwrap_or_else(|_| {
            diagnostics.push(Diagnostic::UnparsedWidth {
                column: index,
                value: text.clone(),
            });
            Width::Auto
        }),
        Some(WidthSpec::Other(value)) => {
            diagnostics.push(Diagnostic::UnparsedWidth {
                column: index,
                value: value.to_string(),
            });
            Width::Auto
        }
    };

    let render = match (&raw.transform, &raw.render) {
        (Some(transform), _) => Some(transform.clone()),
        (None, Some(reference)) => {
            let built = registry.build(reference);
            if built.is_none() {
                diagnostics.push(Diagnostic::UnknownRenderer {
                    column: index,
                    name: reference.name().to_string(),
                });
            }
            built
        }
        (None, None) => None,
    };

    Column {
        title: title.unwrap_or_default().to_string(),
        key: key.unwrap_or_default().to_string(),
        render,
        align,
        width,
    }
}
