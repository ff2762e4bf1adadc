//! Filter criteria: field path → selected option value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Selecting this value for a field means "no constraint". It is treated
/// exactly like the field being absent from the criteria.
pub const ALL_SENTINEL: &str = "all";

/// Committed (or pending) field constraints, keyed by dotted field path.
///
/// Equality ignores sentinel entries, so `{venue: "all"}` equals `{}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterCriteria {
    entries: BTreeMap<String, String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// The constraint on `path`, or `None` when unconstrained.
    pub fn constraint(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str).filter(|v| *v != ALL_SENTINEL)
    }

    /// Set the value for one field. The sentinel removes the constraint.
    pub fn set(&mut self, path: impl Into<String>, value: impl Into<String>) {
        let path = path.into();
        let value = value.into();
        if value == ALL_SENTINEL {
            self.entries.remove(&path);
        } else {
            self.entries.insert(path, value);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Active constraints only, in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter(|(_, v)| v.as_str() != ALL_SENTINEL)
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse a `PATH=VALUE` assignment, as given on the command line.
    pub fn parse_assignment(text: &str) -> Result<(String, String)> {
        let (path, value) =
            text.split_once('=').ok_or_else(|| Error::InvalidCriterion(text.to_string()))?;
        let path = path.trim();
        if path.is_empty() {
            return Err(Error::InvalidCriterion(text.to_string()));
        }
        Ok((path.to_string(), value.trim().to_string()))
    }
}

impl PartialEq for FilterCriteria {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for FilterCriteria {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterCriteria {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut criteria = Self::new();
        for (k, v) in iter {
            criteria.set(k, v);
        }
        criteria
    }
}
