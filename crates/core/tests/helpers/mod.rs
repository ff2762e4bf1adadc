//! Shared fixtures for widget integration tests: a small work-order table
//! and a callback recorder.

use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;

pub fn work_orders() -> Vec<Value> {
    vec![
        json!({ "id": "WO-1", "title": "Leaking sink", "venue": "Auditorium", "active": true,
                "location": { "id": 3, "name": "Science Hall" }, "priority": 2 }),
        json!({ "id": "WO-2", "title": "Broken projector", "venue": "Gym", "active": false,
                "location": { "id": 5, "name": "Library" }, "priority": 1 }),
        json!({ "id": "WO-3", "title": "Flickering light", "venue": "Auditorium", "active": true,
                "location": { "id": 5, "name": "Library" }, "priority": 0 }),
        json!({ "id": "WO-4", "title": "Door hinge", "venue": "", "active": true,
                "location": null, "priority": 3 }),
    ]
}

pub struct Room {
    pub id: &'static str,
    pub name: &'static str,
}

pub fn rooms() -> Vec<Room> {
    vec![Room { id: "1", name: "Room A" }, Room { id: "2", name: "Room B" }]
}

/// Collects every value passed to a widget callback.
#[derive(Clone)]
pub struct Recorder<T> {
    calls: Rc<RefCell<Vec<T>>>,
}

impl<T: Clone> Recorder<T> {
    pub fn new() -> Self {
        Self { calls: Rc::new(RefCell::new(Vec::new())) }
    }

    pub fn push(&self, value: T) {
        self.calls.borrow_mut().push(value);
    }

    pub fn calls(&self) -> Vec<T> {
        self.calls.borrow().clone()
    }
}
