//! Opaque row records as delivered by the list endpoints.
//!
//! A record is whatever JSON value the service layer returned for one row.
//! The renderer only ever reads single fields through [`Record::get`], so no
//! schema is assumed. Values that are not objects are tolerated and simply
//! have no fields.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field used to identify a record when none is configured.
pub const DEFAULT_ID_FIELD: &str = "id";

/// One row of data, owned by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Value);

impl Record {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Read a single field.
    ///
    /// Returns `None` when the field is absent, when `key` is empty, or when
    /// the record is not an object. An explicit JSON `null` is returned as
    /// `Some(Value::Null)`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        if key.is_empty() {
            return None;
        }
        self.0.as_object().and_then(|fields| fields.get(key))
    }

    /// Read a field as a string slice, ignoring non-string values.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Identifier of this record, read from `field`.
    ///
    /// Strings and numbers are accepted; blank strings are treated as absent.
    pub fn id(&self, field: &str) -> Option<RecordId> {
        match self.get(field)? {
            Value::String(text) if !text.trim().is_empty() => Some(RecordId(text.clone())),
            Value::Number(number) => Some(RecordId(number.to_string())),
            _ => None,
        }
    }

    pub fn is_object(&self) -> bool {
        self.0.is_object()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(Value::Object(fields))
    }
}

/// Stable identifier of a record, used to key row actions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
