//! JSON serialization of a rendered table.

use crate::error::EmitError;
use crate::table::RenderedTable;

pub fn to_json(table: &RenderedTable) -> Result<String, EmitError> {
    Ok(serde_json::to_string_pretty(table)?)
}

/// The table as a JSON value, e.g. for embedding in a larger response.
pub fn to_json_value(table: &RenderedTable) -> Result<serde_json::Value, EmitError> {
    Ok(serde_json::to_value(table)?)
}
