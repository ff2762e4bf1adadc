//! Outside-pointer dismissal listeners.
//!
//! [`DismissListeners`] stands in for the document-level pointer-down
//! listener set. An open widget holds a [`DismissGuard`]; the listener is
//! attached when the guard is created and detached exactly once when it is
//! released or dropped, whichever comes first.
//!
//! Pointer-downs that start inside an open filter panel are *contained*:
//! they never reach any listener, so interacting with a panel nested in
//! another widget cannot dismiss that widget.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use tracing::debug;

/// Identifies one widget instance within a listener set.
pub type OwnerId = u64;

/// A pointer-down as seen by the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerDown {
    /// Widget whose own element received the event, if any.
    pub inside: Option<OwnerId>,
    /// Propagation stopped before reaching document listeners.
    pub contained: bool,
}

impl PointerDown {
    /// A click on unrelated page content.
    pub fn outside() -> Self {
        Self { inside: None, contained: false }
    }

    /// A click on a widget's own trigger or list.
    pub fn inside(owner: OwnerId) -> Self {
        Self { inside: Some(owner), contained: false }
    }

    /// A click inside an open filter panel.
    pub fn in_panel(owner: OwnerId) -> Self {
        Self { inside: Some(owner), contained: true }
    }
}

#[derive(Debug, Default)]
struct Registry {
    next_owner: OwnerId,
    next_token: u64,
    listeners: BTreeMap<u64, OwnerId>,
}

/// Shared, single-threaded listener set. Cloning shares the same set.
#[derive(Debug, Clone, Default)]
pub struct DismissListeners {
    inner: Rc<RefCell<Registry>>,
}

impl DismissListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a fresh owner id for a new widget instance.
    pub fn allocate_owner(&self) -> OwnerId {
        let mut registry = self.inner.borrow_mut();
        registry.next_owner += 1;
        registry.next_owner
    }

    pub fn subscribe(&self, owner: OwnerId) -> DismissGuard {
        let mut registry = self.inner.borrow_mut();
        registry.next_token += 1;
        let token = registry.next_token;
        registry.listeners.insert(token, owner);
        debug!(owner, token, "dismiss listener attached");
        DismissGuard { registry: Rc::downgrade(&self.inner), token: Some(token), owner }
    }

    /// Number of attached listeners.
    pub fn len(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Owners that should close in response to `pointer`.
    ///
    /// Contained events reach nobody; otherwise every subscribed owner other
    /// than the one clicked is notified, each at most once.
    pub fn dispatch(&self, pointer: PointerDown) -> Vec<OwnerId> {
        if pointer.contained {
            return Vec::new();
        }
        let registry = self.inner.borrow();
        let mut owners: Vec<OwnerId> =
            registry.listeners.values().copied().filter(|o| Some(*o) != pointer.inside).collect();
        owners.sort_unstable();
        owners.dedup();
        owners
    }
}

/// Attached dismissal listener. Detaches on drop.
#[derive(Debug)]
pub struct DismissGuard {
    registry: Weak<RefCell<Registry>>,
    token: Option<u64>,
    owner: OwnerId,
}

impl DismissGuard {
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn release(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        let Some(token) = self.token.take() else {
            return;
        };
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().listeners.remove(&token);
            debug!(owner = self.owner, token, "dismiss listener detached");
        }
    }
}

impl Drop for DismissGuard {
    fn drop(&mut self) {
        self.detach();
    }
}
