// SPDX-License-Identifier: MPL-2.0
//! Change listener registry.
//!
//! Listeners receive the full ordered active sequence after every change.
//! The registry hands out [`Subscription`] handles that remove their
//! listener on request.

use super::notification::Notification;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Callback invoked with the active notifications, oldest first.
pub type Listener = Rc<dyn Fn(&[Notification])>;

#[derive(Default)]
pub(crate) struct Registry {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

impl Registry {
    pub(crate) fn insert(&mut self, listener: Listener) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|(entry_id, _)| *entry_id == id)
    }

    /// Clones the listener list so callbacks can run without holding a borrow.
    pub(crate) fn snapshot(&self) -> Vec<Listener> {
        self.entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Handle returned by [`Manager::subscribe`](super::Manager::subscribe).
///
/// Dropping the handle keeps the listener registered; call
/// [`Subscription::unsubscribe`] to remove it.
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub(crate) fn new(id: u64, registry: &Rc<RefCell<Registry>>) -> Self {
        Self {
            id,
            registry: Rc::downgrade(registry),
        }
    }

    /// Deregisters the listener.
    ///
    /// Returns `false` if the listener was already removed or the manager
    /// has been dropped.
    pub fn unsubscribe(self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.borrow_mut().remove(self.id))
    }

    /// Returns true while the listener is still registered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.borrow().contains(self.id))
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
