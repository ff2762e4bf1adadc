//! Record matching: case-insensitive free-text containment and discrete
//! equality against normalized option values.
//!
//! Used by the dropdown for label filtering and by the filter panel (and the
//! `filter` CLI command) to narrow a record collection by committed criteria.

use rayon::prelude::*;
use serde_json::Value;

use crate::criteria::{FilterCriteria, ALL_SENTINEL};
use crate::record::{option_value, FieldPath};

/// What a record is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion<'q> {
    /// Case-insensitive substring of the option text. Empty matches everything.
    Text(&'q str),
    /// Exact option value. [`ALL_SENTINEL`] matches everything.
    Exact(&'q str),
}

// ---------------------------------------------------------------------------
// Single-record matching
// ---------------------------------------------------------------------------

/// Case-insensitive containment of `query` in `text`.
pub fn label_matches(text: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    text.to_lowercase().contains(&query.to_lowercase())
}

/// Does `record` satisfy `criterion` at `path`?
///
/// An unresolvable path reads as `""` in text mode and never matches in
/// exact mode.
pub fn matches(record: &Value, path: &FieldPath, criterion: Criterion<'_>) -> bool {
    match criterion {
        Criterion::Text(query) => {
            let text = option_value(record, path).unwrap_or_default();
            label_matches(&text, query)
        }
        Criterion::Exact(ALL_SENTINEL) => true,
        Criterion::Exact(expected) => option_value(record, path).as_deref() == Some(expected),
    }
}

/// Every active constraint in `criteria` holds for `record`.
pub fn matches_criteria(record: &Value, criteria: &FilterCriteria) -> bool {
    criteria
        .iter()
        .all(|(path, value)| matches(record, &FieldPath::parse(path), Criterion::Exact(value)))
}

// ---------------------------------------------------------------------------
// Collection filtering
// ---------------------------------------------------------------------------

/// Records satisfying every constraint, in input order.
pub fn filter_records<'r>(records: &'r [Value], criteria: &FilterCriteria) -> Vec<&'r Value> {
    if criteria.is_empty() {
        return records.iter().collect();
    }
    records.par_iter().filter(|record| matches_criteria(record, criteria)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_match_ignores_case() {
        let record = json!({ "name": "Room B" });
        assert!(matches(&record, &"name".into(), Criterion::Text("room b")));
        assert!(matches(&record, &"name".into(), Criterion::Text("OM")));
        assert!(!matches(&record, &"name".into(), Criterion::Text("room c")));
    }

    #[test]
    fn empty_query_matches_missing_field() {
        let record = json!({ "name": "Room B" });
        assert!(matches(&record, &"venue.name".into(), Criterion::Text("")));
        assert!(!matches(&record, &"venue.name".into(), Criterion::Text("a")));
    }

    #[test]
    fn exact_match_on_missing_field_fails_unless_sentinel() {
        let record = json!({ "status": true });
        assert!(matches(&record, &"status".into(), Criterion::Exact("Active")));
        assert!(!matches(&record, &"venue".into(), Criterion::Exact("Gym")));
        assert!(matches(&record, &"venue".into(), Criterion::Exact(ALL_SENTINEL)));
    }

    #[test]
    fn filter_records_keeps_input_order() {
        let records = vec![
            json!({ "id": 1, "status": true, "location": { "name": "Gym" } }),
            json!({ "id": 2, "status": false, "location": { "name": "Gym" } }),
            json!({ "id": 3, "status": true, "location": { "name": "Library" } }),
            json!({ "id": 4, "status": true, "location": { "name": "Gym" } }),
        ];
        let criteria: FilterCriteria =
            [("status", "Active"), ("location.name", "Gym")].into_iter().collect();
        let ids: Vec<i64> =
            filter_records(&records, &criteria).iter().filter_map(|r| r["id"].as_i64()).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn empty_criteria_returns_everything() {
        let records = vec![json!({ "a": 1 }), json!({ "a": 2 })];
        assert_eq!(filter_records(&records, &FilterCriteria::new()).len(), 2);
    }

    #[test]
    fn criteria_conjunction_with_sentinel_and_missing_field() {
        let record = json!({ "venue": "Gym", "active": true });

        let with_sentinel: FilterCriteria =
            serde_json::from_str(r#"{"venue":"Gym","active":"all"}"#).unwrap();
        assert!(matches_criteria(&record, &with_sentinel));

        let on_missing: FilterCriteria =
            [("venue", "Gym"), ("location.name", "Annex")].into_iter().collect();
        assert!(!matches_criteria(&record, &on_missing));

        let wrong_value: FilterCriteria =
            [("venue", "Gym"), ("active", "Inactive")].into_iter().collect();
        assert!(!matches_criteria(&record, &wrong_value));

        assert!(matches_criteria(&record, &FilterCriteria::new()));
    }
}
