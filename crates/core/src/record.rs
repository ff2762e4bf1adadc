//! Record model: dotted field paths resolved against JSON records, and the
//! normalization that turns a resolved value into a displayable option value.
//!
//! Records are plain [`serde_json::Value`]s owned by the caller. Nothing in
//! this module mutates them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Option label for a `true` boolean field.
pub const ACTIVE_LABEL: &str = "Active";
/// Option label for a `false` boolean field.
pub const INACTIVE_LABEL: &str = "Inactive";

// ---------------------------------------------------------------------------
// Field paths
// ---------------------------------------------------------------------------

/// A dotted key sequence such as `location.name`, pre-split for traversal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let segments = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('.').map(str::to_string).collect()
        };
        Self { raw: trimmed.to_string(), segments }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// An empty path never resolves and makes a column ineligible for filtering.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Walk the record one key at a time. Any missing key, or any intermediate
    /// value that is not an object, yields `None`.
    pub fn resolve<'v>(&self, record: &'v Value) -> Option<&'v Value> {
        if self.is_empty() {
            return None;
        }
        let mut current = record;
        for segment in &self.segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }
}

impl From<&str> for FieldPath {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for FieldPath {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.raw
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Turn a resolved value into its option form.
///
/// Booleans become [`ACTIVE_LABEL`] / [`INACTIVE_LABEL`], objects collapse to
/// their `name` field, strings and numbers pass through as text. Null, arrays
/// and unnamed objects have no option form.
pub fn normalize(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Array(_) => None,
        Value::Bool(true) => Some(ACTIVE_LABEL.to_string()),
        Value::Bool(false) => Some(INACTIVE_LABEL.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map.get("name").and_then(normalize),
    }
}

/// Resolve `path` in `record` and normalize the result.
pub fn option_value(record: &Value, path: &FieldPath) -> Option<String> {
    path.resolve(record).and_then(normalize)
}

/// Like [`option_value`], but also treats zero and empty text as absent.
pub fn truthy_option_value(record: &Value, path: &FieldPath) -> Option<String> {
    let resolved = path.resolve(record)?;
    let resolved = match resolved {
        Value::Object(map) => map.get("name")?,
        other => other,
    };
    if let Value::Number(n) = resolved {
        if n.as_f64() == Some(0.0) {
            return None;
        }
    }
    normalize(resolved).filter(|s| !s.is_empty())
}
