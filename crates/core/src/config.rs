//! `.facetkit.toml` loading.
//!
//! ```toml
//! create_hint_fields = ["Location", "Building"]
//! no_match_message = "Nothing found."
//! panel_width = 320
//! ```

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::dropdown::{CreateHint, DEFAULT_NO_MATCH_MESSAGE};
use crate::error::{Error, Result};
use crate::panel::DEFAULT_PANEL_WIDTH;

pub const CONFIG_FILE_NAME: &str = ".facetkit.toml";

/// Known keys in `.facetkit.toml` for config validation.
const KNOWN_CONFIG_KEYS: &[&str] = &["create_hint_fields", "no_match_message", "panel_width"];

/// Widget settings shared by every dropdown and panel a caller builds.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetConfig {
    /// Dropdown field labels whose empty state announces a new value.
    pub create_hint_fields: Vec<String>,
    pub no_match_message: String,
    pub panel_width: f64,
}

impl Default for FacetConfig {
    fn default() -> Self {
        Self {
            create_hint_fields: vec!["Location".to_string()],
            no_match_message: DEFAULT_NO_MATCH_MESSAGE.to_string(),
            panel_width: DEFAULT_PANEL_WIDTH,
        }
    }
}

impl FacetConfig {
    pub fn empty_state(&self) -> CreateHint {
        CreateHint {
            create_fields: self.create_hint_fields.clone(),
            no_match: self.no_match_message.clone(),
        }
    }
}

/// Simple Levenshtein edit distance for typo suggestions.
fn edit_distance(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

fn warn_unknown_keys(table: &toml::Table) {
    for key in table.keys() {
        if KNOWN_CONFIG_KEYS.contains(&key.as_str()) {
            continue;
        }
        let suggestion = KNOWN_CONFIG_KEYS.iter().min_by_key(|k| edit_distance(key, k));
        match suggestion {
            Some(suggestion) if edit_distance(key, suggestion) <= 3 => warn!(
                key = key.as_str(),
                suggestion = *suggestion,
                "Unknown key in {CONFIG_FILE_NAME} — did you mean '{suggestion}'?"
            ),
            _ => warn!(
                key = key.as_str(),
                "Unknown key in {CONFIG_FILE_NAME} (known keys: {})",
                KNOWN_CONFIG_KEYS.join(", ")
            ),
        }
    }
}

/// Overlay the recognised keys of `table` onto `config`.
fn apply_table(config: &mut FacetConfig, table: &toml::Table, path: &Path) -> Result<()> {
    warn_unknown_keys(table);

    if let Some(value) = table.get("create_hint_fields") {
        let fields = value.as_array().ok_or_else(|| Error::Config {
            path: path.to_path_buf(),
            message: "create_hint_fields must be an array of strings".into(),
        })?;
        config.create_hint_fields =
            fields.iter().filter_map(|v| v.as_str().map(str::to_string)).collect();
    }

    if let Some(value) = table.get("no_match_message") {
        config.no_match_message = value
            .as_str()
            .ok_or_else(|| Error::Config {
                path: path.to_path_buf(),
                message: "no_match_message must be a string".into(),
            })?
            .to_string();
    }

    if let Some(value) = table.get("panel_width") {
        let width = value
            .as_float()
            .or_else(|| value.as_integer().map(|i| i as f64))
            .filter(|w| *w > 0.0)
            .ok_or_else(|| Error::Config {
                path: path.to_path_buf(),
                message: "panel_width must be a positive number".into(),
            })?;
        config.panel_width = width;
    }

    Ok(())
}

/// Load an explicit config file. Any problem is an error.
pub fn load_config_file(path: &Path) -> Result<FacetConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    let table = content.parse::<toml::Table>().map_err(|e| Error::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let mut config = FacetConfig::default();
    apply_table(&mut config, &table, path)?;
    Ok(config)
}

/// Load `.facetkit.toml` from the given project root.
///
/// If the file doesn't exist or can't be used, returns defaults with a warning.
/// Unknown keys trigger a warning with a typo suggestion.
pub fn load_facet_config(project_root: &Path) -> FacetConfig {
    let config_path: PathBuf = project_root.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return FacetConfig::default();
    }

    debug!("Loading {CONFIG_FILE_NAME}");
    match load_config_file(&config_path) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "Failed to load {CONFIG_FILE_NAME}; using defaults");
            FacetConfig::default()
        }
    }
}
