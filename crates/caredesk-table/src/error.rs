//! Error types for the caredesk-table crate.
//!
//! Rendering itself never fails. Errors only arise at the edges: loading a
//! view definition from disk ([`ViewError`]) and writing emitted output
//! ([`EmitError`]).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("failed to read view file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML view definition: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON view definition: {0}")]
    Json(#[from] serde_json::Error),

    /// Extension other than `.toml` or `.json`.
    #[error("unsupported view file format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },
}

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to write markup: {0}")]
    Io(#[from] std::io::Error),

    #[error("emitted markup is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("failed to serialize table: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ViewError>;
