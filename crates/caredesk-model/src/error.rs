use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("list payload has no record array (expected an array or an object with `data`, `records` or `items`)")]
    MissingRecords,
    #[error("pagination field `{field}` must be a non-negative integer")]
    InvalidPageField { field: &'static str },
}

pub type Result<T> = std::result::Result<T, ModelError>;
