//! End-to-end filter panel behaviour: reset-on-open, apply, clear, and
//! containment of pointer events inside the panel.

mod helpers;

use facetkit_core::dismiss::{DismissListeners, PointerDown};
use facetkit_core::dropdown::Dropdown;
use facetkit_core::options::unique_values;
use facetkit_core::panel::{Column, FilterPanel};
use facetkit_core::position::{Anchor, Rect, ScrollOffset};
use facetkit_core::shell::PanelView;
use facetkit_core::FilterCriteria;
use helpers::{rooms, work_orders, Recorder};

fn columns() -> Vec<Column> {
    vec![
        Column::plain("title", "Title"),
        Column::filterable("venue", "Venue"),
        Column::filterable("location.name", "Location"),
        Column::filterable("active", "Status"),
    ]
}

fn trigger() -> Rect {
    Rect::new(600.0, 80.0, 30.0, 30.0)
}

#[test]
fn open_then_close_leaves_committed_untouched() {
    let data = work_orders();
    let listeners = DismissListeners::new();
    let applied = Recorder::new();
    let committed: FilterCriteria = [("venue", "Gym")].into_iter().collect();
    let sink = applied.clone();
    let mut panel = FilterPanel::new(columns(), &data, committed.clone(), &listeners)
        .on_filters_applied(move |c| sink.push(c.clone()));

    panel.toggle(trigger(), ScrollOffset::default());
    panel.toggle(trigger(), ScrollOffset::default());

    assert!(!panel.is_open());
    assert_eq!(panel.state().committed, committed);
    assert!(applied.calls().is_empty());
}

#[test]
fn unapplied_edits_are_discarded_on_reopen() {
    let data = work_orders();
    let listeners = DismissListeners::new();
    let committed: FilterCriteria = [("active", "Active")].into_iter().collect();
    let mut panel = FilterPanel::new(columns(), &data, committed.clone(), &listeners);

    panel.toggle(trigger(), ScrollOffset::default());
    panel.set_field("venue", "Auditorium");
    panel.set_field("active", "Inactive");
    assert_eq!(panel.pending_value("venue"), "Auditorium");
    panel.dismiss();

    panel.toggle(trigger(), ScrollOffset::default());
    assert_eq!(panel.state().pending, committed);
    assert_eq!(panel.pending_value("venue"), "all");
}

#[test]
fn apply_commits_once_and_filters_data() {
    let data = work_orders();
    let listeners = DismissListeners::new();
    let applied = Recorder::new();
    let sink = applied.clone();
    let mut panel = FilterPanel::new(columns(), &data, FilterCriteria::new(), &listeners)
        .on_filters_applied(move |c| sink.push(c.clone()));

    panel.toggle(trigger(), ScrollOffset::default());
    panel.set_field("location.name", "Library");
    panel.set_field("active", "Active");
    assert!(applied.calls().is_empty(), "edits are not reported");
    panel.apply();

    let expected: FilterCriteria =
        [("location.name", "Library"), ("active", "Active")].into_iter().collect();
    assert_eq!(applied.calls(), vec![expected]);
    let ids: Vec<&str> = panel.filtered_data().iter().filter_map(|r| r["id"].as_str()).collect();
    assert_eq!(ids, vec!["WO-3"]);
}

#[test]
fn clear_resets_everything_and_reports_empty() {
    let data = work_orders();
    let listeners = DismissListeners::new();
    let applied = Recorder::new();
    let sink = applied.clone();
    let mut panel = FilterPanel::new(columns(), &data, FilterCriteria::new(), &listeners)
        .on_filters_applied(move |c| sink.push(c.clone()));

    panel.toggle(trigger(), ScrollOffset::default());
    panel.set_field("venue", "Auditorium");
    panel.clear();

    assert_eq!(applied.calls(), vec![FilterCriteria::new()]);
    assert!(!panel.is_open());
    assert!(panel.state().pending.is_empty());
    assert!(panel.state().committed.is_empty());
    assert_eq!(panel.filtered_data().len(), data.len());
}

#[test]
fn anchor_is_recomputed_on_every_open() {
    let data = work_orders();
    let listeners = DismissListeners::new();
    let mut panel = FilterPanel::new(columns(), &data, FilterCriteria::new(), &listeners)
        .panel_width(300.0);

    panel.toggle(trigger(), ScrollOffset::default());
    assert_eq!(panel.state().anchor, Some(Anchor { top: 110.0, left: 330.0 }));
    panel.dismiss();

    panel.toggle(trigger(), ScrollOffset { x: 0.0, y: 500.0 });
    assert_eq!(panel.state().anchor, Some(Anchor { top: 610.0, left: 330.0 }));
}

#[test]
fn clicks_inside_panel_do_not_dismiss_enclosing_dropdown() {
    let data = work_orders();
    let rooms = rooms();
    let listeners = DismissListeners::new();
    let mut dropdown =
        Dropdown::new(&rooms, |r| r.name.to_string(), |r| r.id.to_string(), &listeners);
    let mut panel = FilterPanel::new(columns(), &data, FilterCriteria::new(), &listeners);

    dropdown.focus();
    panel.toggle(trigger(), ScrollOffset::default());
    assert_eq!(listeners.len(), 2);

    let inner = panel.inner_pointer_down();
    let dismissed = listeners.dispatch(inner);
    dropdown.notify_dismissed(&dismissed);
    panel.notify_dismissed(&dismissed);
    assert!(dropdown.state().is_open);
    assert!(panel.is_open());

    let dismissed = listeners.dispatch(PointerDown::outside());
    dropdown.notify_dismissed(&dismissed);
    panel.notify_dismissed(&dismissed);
    assert!(!dropdown.state().is_open);
    assert!(!panel.is_open());
    assert!(listeners.is_empty());
}

#[test]
fn pointer_down_reports_every_dismissed_owner() {
    let data = work_orders();
    let rooms = rooms();
    let listeners = DismissListeners::new();
    let mut dropdown =
        Dropdown::new(&rooms, |r| r.name.to_string(), |r| r.id.to_string(), &listeners);
    let mut panel = FilterPanel::new(columns(), &data, FilterCriteria::new(), &listeners);

    dropdown.focus();
    panel.toggle(trigger(), ScrollOffset::default());

    let dismissed = dropdown.pointer_down(PointerDown::outside());
    assert!(!dropdown.state().is_open);
    assert!(dismissed.contains(&panel.owner()));
    assert!(panel.is_open());

    panel.notify_dismissed(&dismissed);
    assert!(!panel.is_open());
    assert!(listeners.is_empty());
}

#[test]
fn view_lists_options_per_eligible_field() {
    let data = work_orders();
    let listeners = DismissListeners::new();
    let mut panel = FilterPanel::new(columns(), &data, FilterCriteria::new(), &listeners);
    panel.toggle(trigger(), ScrollOffset::default());
    panel.set_field("venue", "Gym");

    let view = PanelView::build(&panel);
    let labels: Vec<&str> = view.fields.iter().map(|f| f.label.as_str()).collect();
    assert_eq!(labels, vec!["Venue", "Location", "Status"]);
    assert_eq!(view.fields[0].options, vec!["all", "Auditorium", "Gym"]);
    assert_eq!(view.fields[0].selected, "Gym");
    assert_eq!(view.fields[1].options, vec!["all", "Library", "Science Hall"]);
    assert_eq!(view.fields[2].options, vec!["all", "Active", "Inactive"]);
    assert_eq!(view.active_filter_count, 0);
}

#[test]
fn unique_values_are_deterministic() {
    let data = work_orders();
    for path in ["venue", "location.name", "location", "active", "priority", "missing.path"] {
        let first = unique_values(&data, &path.into());
        let second = unique_values(&data, &path.into());
        assert_eq!(first, second, "{path}");
    }
    assert_eq!(unique_values(&data, &"priority".into()), vec!["1", "2", "3"]);
}
