//! List-endpoint payloads.
//!
//! The service layer answers list requests either with a bare JSON array or
//! with an envelope carrying the array plus pagination metadata:
//!
//! ```json
//! { "data": [ ... ], "page": 2, "totalPages": 5, "total": 93 }
//! ```
//!
//! `records` and `items` are accepted in place of `data`, and
//! `total_pages`/`totalCount` in place of `totalPages`/`total`.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ModelError, Result};
use crate::record::Record;

const RECORD_KEYS: [&str; 3] = ["data", "records", "items"];

/// Pagination metadata supplied alongside a page of records. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u32,
    pub total_pages: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl PageInfo {
    pub fn new(page: u32, total_pages: u32) -> Self {
        Self {
            page,
            total_pages,
            total: None,
        }
    }

    #[must_use]
    pub fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }
}

/// One page of records returned by a list endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListPage {
    pub records: Vec<Record>,
    /// `None` when the payload was a bare array.
    pub pagination: Option<PageInfo>,
}

impl ListPage {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            pagination: None,
        }
    }

    /// Parse a list payload from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Interpret an already-parsed list payload.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => Ok(Self::new(items.into_iter().map(Record::new).collect())),
            Value::Object(mut fields) => {
                let items = RECORD_KEYS
                    .iter()
                    .find_map(|key| match fields.remove(*key) {
                        Some(Value::Array(items)) => Some(items),
                        _ => None,
                    })
                    .ok_or(ModelError::MissingRecords)?;
                let pagination = read_page_info(&fields)?;
                Ok(Self {
                    records: items.into_iter().map(Record::new).collect(),
                    pagination,
                })
            }
            _ => Err(ModelError::MissingRecords),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn read_page_info(fields: &Map<String, Value>) -> Result<Option<PageInfo>> {
    let page = read_integer(fields, &["page"], "page")?;
    let total_pages = read_integer(fields, &["totalPages", "total_pages"], "totalPages")?;
    let total = read_integer(fields, &["total", "totalCount"], "total")?;
    if page.is_none() && total_pages.is_none() && total.is_none() {
        return Ok(None);
    }
    Ok(Some(PageInfo {
        page: clamp_u32(page.unwrap_or(1)),
        total_pages: clamp_u32(total_pages.unwrap_or(1)),
        total,
    }))
}

fn read_integer(
    fields: &Map<String, Value>,
    keys: &[&str],
    field: &'static str,
) -> Result<Option<u64>> {
    for key in keys {
        match fields.get(*key) {
            None | Some(Value::Null) => continue,
            Some(value) => {
                return value
                    .as_u64()
                    .map(Some)
                    .ok_or(ModelError::InvalidPageField { field });
            }
        }
    }
    Ok(None)
}

fn clamp_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
