//! Searchable dropdown: typed accessors over caller items, a pure
//! `reduce(state, event)` transition function, and the [`Dropdown`] widget
//! that wires transitions to a change callback and a dismissal listener.

use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

use crate::dismiss::{DismissGuard, DismissListeners, OwnerId, PointerDown};
use crate::matcher::label_matches;

// ---------------------------------------------------------------------------
// Empty-state messages
// ---------------------------------------------------------------------------

/// Message shown when no option matches the query, given the field label.
pub trait EmptyState {
    fn message(&self, field_label: &str) -> String;
}

impl<F: Fn(&str) -> String> EmptyState for F {
    fn message(&self, field_label: &str) -> String {
        self(field_label)
    }
}

pub const DEFAULT_NO_MATCH_MESSAGE: &str = "No matches.";

/// Fields in `create_fields` say a new value will be created; everything
/// else gets the generic no-match message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateHint {
    pub create_fields: Vec<String>,
    pub no_match: String,
}

impl Default for CreateHint {
    fn default() -> Self {
        Self {
            create_fields: vec!["Location".to_string()],
            no_match: DEFAULT_NO_MATCH_MESSAGE.to_string(),
        }
    }
}

impl EmptyState for CreateHint {
    fn message(&self, field_label: &str) -> String {
        if self.create_fields.iter().any(|f| f == field_label) {
            format!("{field_label} doesn't exist yet and will be created.")
        } else {
            self.no_match.clone()
        }
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// One selectable entry, materialized from a caller item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownOption {
    pub key: String,
    pub label: String,
    /// Position of the source item in the caller's slice.
    #[serde(skip)]
    pub index: usize,
}

/// Build options from `items`. When two items share a key the first wins.
pub fn collect_options<T>(
    items: &[T],
    label_of: impl Fn(&T) -> String,
    key_of: impl Fn(&T) -> String,
) -> Vec<DropdownOption> {
    let mut seen = HashSet::new();
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let key = key_of(item);
            if !seen.insert(key.clone()) {
                debug!(key = key.as_str(), "duplicate dropdown key skipped");
                return None;
            }
            Some(DropdownOption { key, label: label_of(item), index })
        })
        .collect()
}

/// Options whose label contains `query`, case-insensitively.
pub fn visible_options<'o>(options: &'o [DropdownOption], query: &str) -> Vec<&'o DropdownOption> {
    options.iter().filter(|o| label_matches(&o.label, query)).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DropdownState {
    pub query_text: String,
    pub is_open: bool,
    pub selected_key: Option<String>,
}

impl DropdownState {
    /// Closed, with the query showing the selected option's label.
    pub fn new(selected_key: Option<&str>, options: &[DropdownOption]) -> Self {
        let query_text = selected_key
            .and_then(|key| options.iter().find(|o| o.key == key))
            .map(|o| o.label.clone())
            .unwrap_or_default();
        Self {
            query_text,
            is_open: false,
            selected_key: selected_key.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownEvent {
    Focus,
    Input(String),
    OutsidePointer,
    Choose(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownEffect {
    Changed(String),
}

/// Apply one event. Events that do not apply in the current state leave it
/// unchanged.
pub fn reduce(
    mut state: DropdownState,
    event: DropdownEvent,
    options: &[DropdownOption],
) -> (DropdownState, Option<DropdownEffect>) {
    match event {
        DropdownEvent::Focus => {
            state.is_open = true;
            (state, None)
        }
        DropdownEvent::Input(text) => {
            state.query_text = text;
            state.is_open = true;
            (state, None)
        }
        DropdownEvent::OutsidePointer => {
            state.is_open = false;
            (state, None)
        }
        DropdownEvent::Choose(key) => {
            if !state.is_open {
                return (state, None);
            }
            let Some(option) = options.iter().find(|o| o.key == key) else {
                debug!(key = key.as_str(), "choice not among options; ignored");
                return (state, None);
            };
            state.query_text = option.label.clone();
            state.selected_key = Some(option.key.clone());
            state.is_open = false;
            (state, Some(DropdownEffect::Changed(option.key.clone())))
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// Searchable dropdown over caller-owned items.
pub struct Dropdown<'a, T> {
    items: &'a [T],
    options: Vec<DropdownOption>,
    field_label: String,
    state: DropdownState,
    empty_state: Box<dyn EmptyState + 'a>,
    on_change: Box<dyn FnMut(&str) + 'a>,
    listeners: DismissListeners,
    owner: OwnerId,
    guard: Option<DismissGuard>,
}

impl<'a, T> Dropdown<'a, T> {
    pub fn new(
        items: &'a [T],
        label: impl Fn(&T) -> String,
        key: impl Fn(&T) -> String,
        listeners: &DismissListeners,
    ) -> Self {
        let options = collect_options(items, label, key);
        Self {
            items,
            options,
            field_label: String::new(),
            state: DropdownState::default(),
            empty_state: Box::new(CreateHint::default()),
            on_change: Box::new(|_: &str| {}),
            listeners: listeners.clone(),
            owner: listeners.allocate_owner(),
            guard: None,
        }
    }

    pub fn field_label(mut self, label: impl Into<String>) -> Self {
        self.field_label = label.into();
        self
    }

    pub fn selected(mut self, key: Option<&str>) -> Self {
        self.state = DropdownState::new(key, &self.options);
        self
    }

    pub fn empty_state(mut self, empty_state: impl EmptyState + 'a) -> Self {
        self.empty_state = Box::new(empty_state);
        self
    }

    pub fn on_change(mut self, f: impl FnMut(&str) + 'a) -> Self {
        self.on_change = Box::new(f);
        self
    }

    pub fn state(&self) -> &DropdownState {
        &self.state
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn label(&self) -> &str {
        &self.field_label
    }

    pub fn options(&self) -> &[DropdownOption] {
        &self.options
    }

    pub fn visible_options(&self) -> Vec<&DropdownOption> {
        visible_options(&self.options, &self.state.query_text)
    }

    /// Source items for the currently visible options.
    pub fn visible_items(&self) -> Vec<&'a T> {
        let items = self.items;
        self.visible_options().into_iter().map(|o| &items[o.index]).collect()
    }

    /// Shown while open and nothing matches.
    pub fn empty_message(&self) -> Option<String> {
        if self.state.is_open && self.visible_options().is_empty() {
            Some(self.empty_state.message(&self.field_label))
        } else {
            None
        }
    }

    pub fn handle(&mut self, event: DropdownEvent) {
        let state = std::mem::take(&mut self.state);
        let (next, effect) = reduce(state, event, &self.options);
        self.state = next;
        self.sync_listener();

        if let Some(DropdownEffect::Changed(key)) = effect {
            debug!(field = self.field_label.as_str(), key = key.as_str(), "dropdown selection");
            (self.on_change)(key.as_str());
        }
    }

    pub fn focus(&mut self) {
        self.handle(DropdownEvent::Focus);
    }

    pub fn input(&mut self, text: impl Into<String>) {
        self.handle(DropdownEvent::Input(text.into()));
    }

    pub fn choose(&mut self, key: impl Into<String>) {
        self.handle(DropdownEvent::Choose(key.into()));
    }

    /// Route a document pointer-down through the shared listener set and
    /// close if this dropdown is among the dismissed owners.
    ///
    /// Returns every dismissed owner. When other widgets share the listener
    /// set, hand the list to their `notify_dismissed` as well.
    pub fn pointer_down(&mut self, pointer: PointerDown) -> Vec<OwnerId> {
        let dismissed = self.listeners.dispatch(pointer);
        self.notify_dismissed(&dismissed);
        dismissed
    }

    pub fn notify_dismissed(&mut self, dismissed: &[OwnerId]) {
        if dismissed.contains(&self.owner) {
            self.handle(DropdownEvent::OutsidePointer);
        }
    }

    fn sync_listener(&mut self) {
        match (self.state.is_open, self.guard.is_some()) {
            (true, false) => self.guard = Some(self.listeners.subscribe(self.owner)),
            (false, true) => self.guard = None,
            _ => {}
        }
    }
}
