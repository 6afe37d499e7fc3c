//! Side channel for silent degradations.
//!
//! Rendering never fails on malformed descriptors. Each place where a value
//! was dropped or defaulted is reported here instead; callers decide whether
//! that matters.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    #[error("column {column}: neither `title` nor `header` given, header is empty")]
    MissingTitle { column: usize },
    #[error("column {column}: neither `dataIndex` nor `accessor` given, cells are empty")]
    MissingKey { column: usize },
    #[error("column {column}: unknown alignment `{value}`, using left")]
    UnknownAlign { column: usize, value: String },
    #[error("column {column}: unparsed width `{value}`, using auto")]
    UnparsedWidth { column: usize, value: String },
    #[error("column {column}: unknown renderer `{name}`, showing raw values")]
    UnknownRenderer { column: usize, name: String },
}

impl Diagnostic {
    /// Index of the column the diagnostic refers to.
    pub fn column(&self) -> usize {
        match self {
            Diagnostic::MissingTitle { column }
            | Diagnostic::MissingKey { column }
            | Diagnostic::UnknownAlign { column, .. }
            | Diagnostic::UnparsedWidth { column, .. }
            | Diagnostic::UnknownRenderer { column, .. } => *column,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Diagnostic::MissingTitle { .. } => "missing_title",
            Diagnostic::MissingKey { .. } => "missing_key",
            Diagnostic::UnknownAlign { .. } => "unknown_align",
            Diagnostic::UnparsedWidth { .. } => "unparsed_width",
            Diagnostic::UnknownRenderer { .. } => "unknown_renderer",
        }
    }
}
