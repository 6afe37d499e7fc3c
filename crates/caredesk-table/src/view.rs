//! View definitions: a table's configuration as stored on disk.
//!
//! ```toml
//! title = "Patients"
//!
//! [options]
//! striped = true
//! emptyMessage = "No patients found"
//!
//! [actions]
//! items = [{ kind = "view" }, { kind = "verify", label = "Approve" }]
//!
//! [[columns]]
//! header = "Name"
//! accessor = "name"
//!
//! [[columns]]
//! title = "Age"
//! dataIndex = "dob"
//! render = "age"
//! align = "right"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::actions::ActionSet;
use crate::column::RawColumn;
use crate::error::{Result, ViewError};
use crate::registry::RendererRegistry;
use crate::table::{Table, TableOptions};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewDefinition {
    pub title: Option<String>,
    pub columns: Vec<RawColumn>,
    pub options: TableOptions,
    pub actions: ActionSet,
}

impl ViewDefinition {
    /// Load a `.toml` or `.json` view file.
    pub fn load(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        if !matches!(extension.as_deref(), Some("toml" | "json")) {
            return Err(ViewError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }

        let text = fs::read_to_string(path).map_err(|source| ViewError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let view = match extension.as_deref() {
            Some("json") => Self::from_json_str(&text)?,
            _ => Self::from_toml_str(&text)?,
        };
        debug!(
            path = %path.display(),
            columns = view.columns.len(),
            actions = view.actions.actions().len(),
            "loaded view definition"
        );
        Ok(view)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build the configured table, resolving named renderers in `registry`.
    pub fn into_table(self, registry: &RendererRegistry) -> Table {
        Table::with_registry(&self.columns, registry)
            .options(self.options)
            .actions(self.actions)
    }
}
