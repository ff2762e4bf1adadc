//! facetkit — headless searchable dropdown and column-filter panel.
//!
//! The widgets hold only selection state; records stay with the caller and
//! are borrowed read-only. Every transition is a plain `reduce(state, event)`
//! call, so the logic is testable without any rendering layer.
//!
//! # Modules
//!
//! - [`record`] — Dotted field paths and option-value normalization
//! - [`criteria`] — Field → value filter criteria with the `all` sentinel
//! - [`matcher`] — Free-text and exact matching, collection filtering
//! - [`options`] — Distinct, sorted option values per field
//! - [`sort`] — Table sorting by a field
//! - [`position`] — Panel anchor below its trigger
//! - [`dismiss`] — Scoped outside-pointer listeners
//! - [`dropdown`] — Searchable dropdown state machine and widget
//! - [`panel`] — Filter panel state machine and widget
//! - [`shell`] — View models for renderers
//! - [`config`] — `.facetkit.toml` loading
//! - [`error`] — Errors for file loading and criterion parsing

pub mod config;
pub mod criteria;
pub mod dismiss;
pub mod dropdown;
pub mod error;
pub mod matcher;
pub mod options;
pub mod panel;
pub mod position;
pub mod record;
pub mod shell;
pub mod sort;

use serde_json::Value;
use std::path::Path;
use tracing::debug;

pub use config::{load_config_file, load_facet_config, FacetConfig};
pub use criteria::{FilterCriteria, ALL_SENTINEL};
pub use error::{Error, Result};
pub use record::FieldPath;

/// Read a JSON array of records from `path`.
pub fn load_records(path: &Path) -> Result<Vec<Value>> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    let value: Value = serde_json::from_str(&content)
        .map_err(|source| Error::Json { path: path.to_path_buf(), source })?;
    match value {
        Value::Array(records) => {
            debug!(count = records.len(), path = %path.display(), "records loaded");
            Ok(records)
        }
        _ => Err(Error::NotAnArray { path: path.to_path_buf() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_array_and_rejects_other_json() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("orders.json");
        std::fs::write(&good, r#"[{"id":"WO-1"},{"id":"WO-2"}]"#).unwrap();
        assert_eq!(load_records(&good).unwrap().len(), 2);

        let object = dir.path().join("object.json");
        std::fs::write(&object, r#"{"id":"WO-1"}"#).unwrap();
        assert!(matches!(load_records(&object), Err(Error::NotAnArray { .. })));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "[{").unwrap();
        assert!(matches!(load_records(&broken), Err(Error::Json { .. })));

        assert!(matches!(load_records(&dir.path().join("missing.json")), Err(Error::Io { .. })));
    }
}
