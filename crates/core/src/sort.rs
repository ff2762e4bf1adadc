//! Table-style record sorting by a field's option value.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

use crate::options::locale_compare;
use crate::record::{option_value, FieldPath};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Stable sort of `records` by the option value at `path`.
///
/// Numeric values come before text values; numbers compare numerically and
/// text with [`locale_compare`]. Records without a value go last in either
/// direction.
pub fn sort_records<'r>(
    records: &'r [Value],
    path: &FieldPath,
    direction: SortDirection,
) -> Vec<&'r Value> {
    let mut keyed: Vec<(Option<SortKey>, &Value)> =
        records.iter().map(|r| (sort_key(r, path), r)).collect();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ord = a.cmp_to(b);
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        }
    });

    keyed.into_iter().map(|(_, r)| r).collect()
}

enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    /// Total order: every number before every text.
    fn cmp_to(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
            (SortKey::Text(a), SortKey::Text(b)) => locale_compare(a, b),
        }
    }
}

fn sort_key(record: &Value, path: &FieldPath) -> Option<SortKey> {
    match path.resolve(record)? {
        Value::Number(n) => n.as_f64().map(SortKey::Number),
        _ => option_value(record, path).map(SortKey::Text),
    }
}
