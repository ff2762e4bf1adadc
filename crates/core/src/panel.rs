//! Column filter panel: pending-vs-committed criteria, anchored below its
//! trigger, committing only on Apply or Clear.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::criteria::{FilterCriteria, ALL_SENTINEL};
use crate::dismiss::{DismissGuard, DismissListeners, OwnerId, PointerDown};
use crate::matcher::filter_records;
use crate::options::unique_values;
use crate::position::{compute_anchor, Anchor, Rect, ScrollOffset};
use crate::record::FieldPath;

/// Default measured panel width in pixels.
pub const DEFAULT_PANEL_WIDTH: f64 = 288.0;

/// A table column as described by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub field_path: FieldPath,
    pub display_label: String,
    #[serde(default)]
    pub filterable: bool,
}

impl Column {
    pub fn filterable(field_path: &str, display_label: &str) -> Self {
        Self {
            field_path: FieldPath::parse(field_path),
            display_label: display_label.to_string(),
            filterable: true,
        }
    }

    pub fn plain(field_path: &str, display_label: &str) -> Self {
        Self { filterable: false, ..Self::filterable(field_path, display_label) }
    }

    /// Only filterable columns with a non-empty path show up in the panel.
    pub fn is_eligible(&self) -> bool {
        self.filterable && !self.field_path.is_empty()
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PanelState {
    pub open: bool,
    pub pending: FilterCriteria,
    /// Mirror of the caller's committed criteria.
    pub committed: FilterCriteria,
    pub anchor: Option<Anchor>,
}

impl PanelState {
    pub fn new(committed: FilterCriteria) -> Self {
        Self { committed, ..Self::default() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    Open { trigger: Rect, scroll: ScrollOffset, panel_width: f64 },
    SetField { path: String, value: String },
    Apply,
    Clear,
    Dismiss,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEffect {
    FiltersApplied(FilterCriteria),
}

/// Apply one event given the eligible columns.
///
/// With no eligible columns Apply and Clear are disabled and do nothing.
/// Events that do not apply in the current state leave it unchanged.
pub fn reduce(
    mut state: PanelState,
    event: PanelEvent,
    eligible: &[&Column],
) -> (PanelState, Option<PanelEffect>) {
    match event {
        PanelEvent::Open { trigger, scroll, panel_width } => {
            if state.open {
                return (state, None);
            }
            state.pending = state.committed.clone();
            state.anchor = Some(compute_anchor(trigger, scroll, panel_width));
            state.open = true;
            (state, None)
        }
        PanelEvent::SetField { path, value } => {
            if !state.open || !eligible.iter().any(|c| c.field_path.as_str() == path) {
                return (state, None);
            }
            state.pending.set(path, value);
            (state, None)
        }
        PanelEvent::Apply => {
            if !state.open || eligible.is_empty() {
                return (state, None);
            }
            state.committed = state.pending.clone();
            state.open = false;
            let applied = state.committed.clone();
            (state, Some(PanelEffect::FiltersApplied(applied)))
        }
        PanelEvent::Clear => {
            if !state.open || eligible.is_empty() {
                return (state, None);
            }
            state.pending.clear();
            state.committed.clear();
            state.open = false;
            (state, Some(PanelEffect::FiltersApplied(FilterCriteria::new())))
        }
        PanelEvent::Dismiss => {
            state.pending = state.committed.clone();
            state.open = false;
            (state, None)
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// Filter panel over caller-owned records.
pub struct FilterPanel<'a> {
    columns: Vec<Column>,
    data: &'a [Value],
    state: PanelState,
    panel_width: f64,
    on_filters_applied: Box<dyn FnMut(&FilterCriteria) + 'a>,
    listeners: DismissListeners,
    owner: OwnerId,
    guard: Option<DismissGuard>,
}

impl<'a> FilterPanel<'a> {
    pub fn new(
        columns: Vec<Column>,
        data: &'a [Value],
        committed: FilterCriteria,
        listeners: &DismissListeners,
    ) -> Self {
        Self {
            columns,
            data,
            state: PanelState::new(committed),
            panel_width: DEFAULT_PANEL_WIDTH,
            on_filters_applied: Box::new(|_: &FilterCriteria| {}),
            listeners: listeners.clone(),
            owner: listeners.allocate_owner(),
            guard: None,
        }
    }

    pub fn panel_width(mut self, width: f64) -> Self {
        self.panel_width = width;
        self
    }

    pub fn on_filters_applied(mut self, f: impl FnMut(&FilterCriteria) + 'a) -> Self {
        self.on_filters_applied = Box::new(f);
        self
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn is_open(&self) -> bool {
        self.state.open
    }

    pub fn eligible_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.is_eligible()).collect()
    }

    pub fn has_filters(&self) -> bool {
        self.columns.iter().any(Column::is_eligible)
    }

    /// Choices for one field: the sentinel first, then the distinct values.
    pub fn options_for(&self, path: &FieldPath) -> Vec<String> {
        let mut options = vec![ALL_SENTINEL.to_string()];
        options.extend(unique_values(self.data, path));
        options
    }

    /// Pending selection for a field, the sentinel when unconstrained.
    pub fn pending_value(&self, path: &str) -> &str {
        self.state.pending.constraint(path).unwrap_or(ALL_SENTINEL)
    }

    /// Records passing the committed criteria.
    pub fn filtered_data(&self) -> Vec<&'a Value> {
        filter_records(self.data, &self.state.committed)
    }

    pub fn handle(&mut self, event: PanelEvent) {
        let eligible: Vec<&Column> = self.columns.iter().filter(|c| c.is_eligible()).collect();
        let state = std::mem::take(&mut self.state);
        let (next, effect) = reduce(state, event, &eligible);
        self.state = next;
        self.sync_listener();

        if let Some(PanelEffect::FiltersApplied(criteria)) = effect {
            debug!(active = criteria.len(), "filters applied");
            (self.on_filters_applied)(&criteria);
        }
    }

    /// Trigger click: open when closed, close without applying when open.
    pub fn toggle(&mut self, trigger: Rect, scroll: ScrollOffset) {
        if self.state.open {
            self.handle(PanelEvent::Dismiss);
        } else {
            let panel_width = self.panel_width;
            self.handle(PanelEvent::Open { trigger, scroll, panel_width });
        }
    }

    pub fn set_field(&mut self, path: &str, value: &str) {
        self.handle(PanelEvent::SetField { path: path.to_string(), value: value.to_string() });
    }

    pub fn apply(&mut self) {
        self.handle(PanelEvent::Apply);
    }

    pub fn clear(&mut self) {
        self.handle(PanelEvent::Clear);
    }

    pub fn dismiss(&mut self) {
        self.handle(PanelEvent::Dismiss);
    }

    /// A pointer-down inside this panel. Contained, so it dismisses nothing.
    pub fn inner_pointer_down(&self) -> PointerDown {
        PointerDown::in_panel(self.owner)
    }

    /// Dispatch a document pointer-down and close this panel if it is among
    /// the dismissed owners. The full dismissed list is returned; with several
    /// widgets on one listener set, pass it to each one's `notify_dismissed`.
    pub fn pointer_down(&mut self, pointer: PointerDown) -> Vec<OwnerId> {
        let dismissed = self.listeners.dispatch(pointer);
        self.notify_dismissed(&dismissed);
        dismissed
    }

    pub fn notify_dismissed(&mut self, dismissed: &[OwnerId]) {
        if dismissed.contains(&self.owner) {
            self.handle(PanelEvent::Dismiss);
        }
    }

    fn sync_listener(&mut self) {
        match (self.state.open, self.guard.is_some()) {
            (true, false) => self.guard = Some(self.listeners.subscribe(self.owner)),
            (false, true) => self.guard = None,
            _ => {}
        }
    }
}
