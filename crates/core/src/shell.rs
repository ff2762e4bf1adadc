//! View models for the presentation layer. A renderer draws these; it never
//! reads widget state directly.

use serde::Serialize;
use std::fmt;

use crate::dropdown::Dropdown;
use crate::panel::FilterPanel;
use crate::position::Anchor;

pub const NO_FILTERS_MESSAGE: &str = "No filters available";

// ---------------------------------------------------------------------------
// Dropdown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionRow {
    pub key: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownView {
    pub field_label: String,
    pub input_text: String,
    pub open: bool,
    pub rows: Vec<OptionRow>,
    #[serde(rename = "emptyMessage", skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

impl DropdownView {
    pub fn build<T>(dropdown: &Dropdown<'_, T>) -> Self {
        let state = dropdown.state();
        let rows = if state.is_open {
            dropdown
                .visible_options()
                .into_iter()
                .map(|o| OptionRow {
                    key: o.key.clone(),
                    label: o.label.clone(),
                    selected: state.selected_key.as_deref() == Some(o.key.as_str()),
                })
                .collect()
        } else {
            Vec::new()
        };
        Self {
            field_label: dropdown.label().to_string(),
            input_text: state.query_text.clone(),
            open: state.is_open,
            rows,
            empty_message: dropdown.empty_message(),
        }
    }
}

impl fmt::Display for DropdownView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.field_label.is_empty() { "Select" } else { &self.field_label };
        writeln!(f, "{label}: [{}]{}", self.input_text, if self.open { " ▾" } else { "" })?;
        for row in &self.rows {
            let marker = if row.selected { '●' } else { ' ' };
            writeln!(f, "  {marker} {:<40} {}", row.label, row.key)?;
        }
        if let Some(message) = &self.empty_message {
            writeln!(f, "  {message}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Filter panel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub path: String,
    pub label: String,
    pub options: Vec<String>,
    pub selected: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView {
    pub open: bool,
    pub anchor: Option<Anchor>,
    pub fields: Vec<FieldView>,
    #[serde(rename = "noFiltersMessage", skip_serializing_if = "Option::is_none")]
    pub no_filters_message: Option<String>,
    #[serde(rename = "applyEnabled")]
    pub apply_enabled: bool,
    #[serde(rename = "clearEnabled")]
    pub clear_enabled: bool,
    /// Committed constraints, for the trigger's badge.
    #[serde(rename = "activeFilterCount")]
    pub active_filter_count: usize,
}

impl PanelView {
    pub fn build(panel: &FilterPanel<'_>) -> Self {
        let state = panel.state();
        let has_filters = panel.has_filters();
        let fields = if state.open {
            panel
                .eligible_columns()
                .into_iter()
                .map(|c| FieldView {
                    path: c.field_path.to_string(),
                    label: c.display_label.clone(),
                    options: panel.options_for(&c.field_path),
                    selected: panel.pending_value(c.field_path.as_str()).to_string(),
                })
                .collect()
        } else {
            Vec::new()
        };
        Self {
            open: state.open,
            anchor: if state.open { state.anchor } else { None },
            fields,
            no_filters_message: (state.open && !has_filters).then(|| NO_FILTERS_MESSAGE.to_string()),
            apply_enabled: state.open && has_filters,
            clear_enabled: state.open && has_filters,
            active_filter_count: state.committed.len(),
        }
    }
}

impl fmt::Display for PanelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.open {
            return writeln!(f, "Filters ({} active)", self.active_filter_count);
        }
        if let Some(anchor) = self.anchor {
            writeln!(f, "Filters @ ({:.0}, {:.0})", anchor.left, anchor.top)?;
        }
        if let Some(message) = &self.no_filters_message {
            writeln!(f, "  {message}")?;
        }
        for field in &self.fields {
            writeln!(f, "  {:<20} = {}  ({})", field.label, field.selected, field.options.join(" | "))?;
        }
        Ok(())
    }
}
