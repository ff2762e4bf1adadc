//! Distinct filter options for a field across a record collection.

use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashSet;

use crate::record::{truthy_option_value, FieldPath};

/// Collation used for option lists and record sorting: case-insensitive
/// first, raw text as the tie-break so the order stays total.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Sorted, de-duplicated option values for `path`.
///
/// Zero, empty text and unresolvable values are skipped, so a field whose
/// legitimate value is `0` or `""` never offers that value as an option.
/// Computed from scratch on every call.
pub fn unique_values(records: &[Value], path: &FieldPath) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut values: Vec<String> = records
        .iter()
        .filter_map(|record| truthy_option_value(record, path))
        .filter(|value| seen.insert(value.clone()))
        .collect();
    values.sort_by(|a, b| locale_compare(a, b));
    values
}
